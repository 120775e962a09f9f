pub mod browse;
pub mod completions;
pub mod config;
pub mod profile;
pub mod search;
