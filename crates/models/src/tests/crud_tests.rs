use crate::db::connect;
use crate::service::{NewService, ServiceStatus};
use crate::{host, service, workspace};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use anyhow::Result;
use migration::MigratorTrait;
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is configured.
async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

#[tokio::test]
async fn test_workspace_host_service_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let ws = workspace::create(&db, &format!("ws_{}", Uuid::new_v4().simple())).await?;
    let h = host::create(&db, ws.id, "192.168.0.10", "linux", "").await?;
    let created = service::create(&db, NewService {
        workspace_id: ws.id,
        host_id: h.id,
        name: "ssh".into(),
        port: 22,
        protocol: "tcp".into(),
        status: ServiceStatus::Open,
        description: String::new(),
        owned: false,
        owner: String::new(),
        version: String::new(),
        creator: String::new(),
        command_id: None,
    }).await?;

    let found = service::Entity::find()
        .filter(service::Column::WorkspaceId.eq(ws.id))
        .all(&db)
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    let mut changed = created.clone();
    changed.status = "closed".into();
    changed.port = 2222;
    // 尝试改 host_id：不应写入
    changed.host_id = Uuid::new_v4();
    let saved = service::save_mutable_fields(&db, &changed).await?.expect("row exists");
    assert_eq!(saved.status, "closed");
    assert_eq!(saved.port, 2222);
    assert_eq!(saved.host_id, h.id);

    service::Entity::delete_by_id(created.id).exec(&db).await?;
    host::Entity::delete_by_id(h.id).exec(&db).await?;
    workspace::Entity::delete_by_id(ws.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_port_is_conflict() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let ws = workspace::create(&db, &format!("ws_{}", Uuid::new_v4().simple())).await?;
    let h = host::create(&db, ws.id, "192.168.0.11", "", "").await?;
    let new = || NewService {
        workspace_id: ws.id,
        host_id: h.id,
        name: "http".into(),
        port: 80,
        protocol: "tcp".into(),
        status: ServiceStatus::Open,
        description: String::new(),
        owned: false,
        owner: String::new(),
        version: String::new(),
        creator: String::new(),
        command_id: None,
    };
    service::create(&db, new()).await?;
    // 唯一索引 uniq_service_host_port_protocol
    let err = service::create(&db, new()).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Conflict(_)), "got {err:?}");

    let dup_ws = workspace::create(&db, &ws.name).await.unwrap_err();
    assert!(matches!(dup_ws, crate::errors::ModelError::Conflict(_)));

    workspace::Entity::delete_by_id(ws.id).exec(&db).await?;
    Ok(())
}
