use anyhow::Result;
use std::path::Path;
use whatsthemove::config;

/// Display the effective configuration as TOML.
pub fn show(config_path: &Path) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    println!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}

/// Validate the configuration file.
pub fn validate(config_path: &Path) -> Result<()> {
    config::load_config(config_path)?;
    println!("Configuration is valid");
    Ok(())
}
