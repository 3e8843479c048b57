use anyhow::Result;
use std::path::Path;
use tracing::info;
use whatsthemove::{config, server};

/// Execute the start command: load configuration and run the server in the
/// foreground until a shutdown signal arrives.
pub async fn execute(config_path: &Path) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    info!(config = %config_path.display(), "Configuration loaded");

    server::start_server(cfg, config_path.to_path_buf()).await
}
