use crate::app_config::AppConfig;

pub fn config_cmd(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
