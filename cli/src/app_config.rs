use std::path::Path;

use recipes_core::PageSize;
use serde::Serialize;

use crate::{args::ConfigArgs, profile::Profile};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_path: String,
    pub base_url: String,
    pub page_size: PageSize,
    pub profile_exists: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_path: "./".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: PageSize::default(),
            profile_exists: false,
        }
    }
}

impl AppConfig {
    /// Flag or environment first, then the profile, then defaults
    pub fn from_args(args: ConfigArgs, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let defaults = AppConfig::default();

        let base_url = args
            .base_url
            .or_else(|| profile.and_then(|p| p.base_url.clone()))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let page_size = profile
            .and_then(|p| p.page_size)
            .unwrap_or(defaults.page_size);

        AppConfig {
            profile_exists: profile.is_some(),
            profile_path: profile_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.profile_path),
            base_url,
            page_size,
        }
    }
}
