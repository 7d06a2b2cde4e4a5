use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::repository::{MemoryInventoryRepository, SeaOrmInventoryRepository};

use crate::routes;
use crate::state::{DynRepository, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first; environment variables only when no file exists.
/// A present but invalid file is an error.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) if is_missing_file(&e) => {
            warn!(error = %e, "no config file; using environment");
            AppConfig::from_env()
        }
        Err(e) => Err(e.context("invalid config file")),
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

/// Open the configured storage backend, migrating the database if needed.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<DynRepository>> {
    match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!("database migrations applied");
            Ok(Arc::new(SeaOrmInventoryRepository::new(db)))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryInventoryRepository::new()))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = load_config()?;
    let repo = build_repository(&cfg).await?;
    let state = ServerState::new(repo);

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, backend = ?cfg.storage.backend, "starting inventory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
