#![cfg(test)]
use std::sync::Arc;

use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;
use models::service::{NewService, ServiceStatus};
use models::{host, workspace};

use crate::repository::{InventoryRepository, MemoryInventoryRepository};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::AppConfig::from_env().map(|c| c.database).unwrap_or_default();
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.clamp(1, cfg.max_connections);
    cfg.connect_timeout_secs = cfg.connect_timeout_secs.max(1);
    cfg.acquire_timeout_secs = 10;
    cfg
}

/// Migrated PostgreSQL connection, or `None` when DB tests are disabled.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&db_config()).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
        })
        .await;
    Ok(Some(connect_with_config(&db_config()).await?))
}

/// Two workspaces with one host each, on a fresh in-memory repository.
pub struct Fixture {
    pub repo: Arc<MemoryInventoryRepository>,
    pub ws: workspace::Model,
    pub other_ws: workspace::Model,
    pub host: host::Model,
    pub other_host: host::Model,
}

impl Fixture {
    pub async fn new() -> Self {
        let repo = Arc::new(MemoryInventoryRepository::new());
        let ws = repo.create_workspace("test_ws").await.expect("workspace");
        let other_ws = repo.create_workspace("second_ws").await.expect("second workspace");
        let host = repo.create_host(ws.id, "10.0.0.1", "linux", "").await.expect("host");
        let other_host = repo.create_host(other_ws.id, "10.0.0.2", "windows", "").await.expect("other host");
        Self { repo, ws, other_ws, host, other_host }
    }
}

pub fn new_service(host: &host::Model, port: i32) -> NewService {
    NewService {
        workspace_id: host.workspace_id,
        host_id: host.id,
        name: format!("svc-{}", port),
        port,
        protocol: "tcp".into(),
        status: ServiceStatus::Open,
        description: String::new(),
        owned: false,
        owner: String::new(),
        version: String::new(),
        creator: String::new(),
        command_id: None,
    }
}
