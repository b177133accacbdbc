use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use billed::config::AppConfig;
use billed::server::ServerBuilder;

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config);

    tracing::info!(
        address = %config.server.address,
        seeded = config.bills.seed_fixtures,
        "starting billed"
    );

    ServerBuilder::new().with_config(config).serve().await
}
