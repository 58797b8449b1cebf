use std::sync::Arc;

use fish_core::InMemoryFishApi;
use fish_mock_server::Settings;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;
    let db = if settings.seeded {
        InMemoryFishApi::seeded()
    } else {
        InMemoryFishApi::new()
    };

    let listener = TcpListener::bind(settings.bind).await?;
    fish_mock_server::serve(listener, fish_mock_server::app_with(Arc::new(db))).await?;
    Ok(())
}
