pub mod codec;
pub mod config;
pub mod distance;
pub mod error;
pub mod handlers;
pub mod housing;
pub mod jobs;
pub mod listings;
pub mod metrics;
pub mod models;
pub mod movers;
pub mod plan;
pub mod pricing;
pub mod selection;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once per process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
