use std::sync::Arc;

use sgpa::engine::Calculator;
use sgpa::error::Result;
use sgpa::interface::GradeInterface;
use sgpa::persist::RecordStore;
use sgpa::server;
use sgpa::settings::Settings;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = RecordStore::open(settings.persistence_mode())?;
    let interface = Arc::new(GradeInterface::new(Calculator::default(), store));

    let listener = TcpListener::bind(&settings.server.bind).await?;
    info!(bind = %settings.server.bind, database = %settings.database.path, "sgpa listening");
    axum::serve(listener, server::router(interface)).await?;
    Ok(())
}
