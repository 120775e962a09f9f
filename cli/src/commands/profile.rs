use recipes_core::PageSize;

use crate::{
    app_config::DEFAULT_BASE_URL,
    args::ProfileCommand,
    profile::{self, Profile},
};

pub fn profile_cmd(subcommand: Option<ProfileCommand>) -> Result<(), anyhow::Error> {
    match subcommand.unwrap_or(ProfileCommand::Current) {
        ProfileCommand::Use {
            name,
            url,
            page_size,
        } => {
            profile::set_current_profile_name(&name)?;

            let config_path = profile::get_profile_config_path(&name);
            let existing = Profile::from_path(&config_path)?;
            let created = existing.is_none();

            if url.is_some() || page_size.is_some() || created {
                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                let mut updated = existing.unwrap_or_default();
                if url.is_some() {
                    updated.base_url = url;
                }
                if page_size.is_some() {
                    updated.page_size = page_size;
                }
                updated.save(&config_path)?;

                if created {
                    println!("Created new profile: {}", name);
                }
            }

            println!("Switched to profile: {}", name);
        }
        ProfileCommand::List => {
            let profiles = profile::list_profiles()?;
            let current =
                profile::get_current_profile_name().unwrap_or_else(|_| "default".to_string());

            println!("Available profiles:");
            for profile_name in profiles {
                let marker = if profile_name == current { "*" } else { " " };
                let (url, page_size) = describe(&profile_name)?;
                println!("{} {} ({}, {} per page)", marker, profile_name, url, page_size);
            }
        }
        ProfileCommand::Current => {
            let current = profile::get_current_profile_name()?;
            let (url, page_size) = describe(&current)?;
            println!("Current profile: {} ({}, {} per page)", current, url, page_size);
        }
    }

    Ok(())
}

fn describe(profile_name: &str) -> anyhow::Result<(String, PageSize)> {
    let stored = Profile::from_path(&profile::get_profile_config_path(profile_name))?;
    let url = stored
        .as_ref()
        .and_then(|p| p.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let page_size = stored.and_then(|p| p.page_size).unwrap_or_default();
    Ok((url, page_size))
}
