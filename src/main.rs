mod application;
mod config;
mod domain;
mod infrastructure;

use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;

use crate::application::services::ChunkerService;
use crate::config::Config;
use crate::infrastructure::database::create_connection_pool;
use crate::infrastructure::database::repositories::PostgresChunkStore;
use crate::infrastructure::extractors::CompositeExtractor;
use crate::infrastructure::watcher::WatchDispatcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let pool = create_connection_pool(&config.database)?;
    let store = Arc::new(PostgresChunkStore::new(pool));
    store.ensure_schema()?;
    info!("database schema ready");

    let extractor = Arc::new(CompositeExtractor::new());
    let chunker = Arc::new(ChunkerService::new(extractor, store.clone()));

    let mut dispatcher =
        WatchDispatcher::new(config.watch_dir, config.chunk_size, chunker, store);
    dispatcher.run().await?;

    Ok(())
}
