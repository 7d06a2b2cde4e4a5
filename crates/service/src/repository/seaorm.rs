use async_trait::async_trait;
use common::pagination::Pagination;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::{host, service, workspace};

use super::InventoryRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmInventoryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl InventoryRepository for SeaOrmInventoryRepository {
    async fn find_workspace_by_name(&self, name: &str) -> Result<Option<workspace::Model>, ServiceError> {
        Ok(workspace::Entity::find()
            .filter(workspace::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn create_workspace(&self, name: &str) -> Result<workspace::Model, ServiceError> {
        if self.find_workspace_by_name(name).await?.is_some() {
            return Err(ServiceError::Conflict(format!("workspace `{}` already exists", name)));
        }
        Ok(workspace::create(&self.db, name).await?)
    }

    async fn list_workspaces(&self) -> Result<Vec<workspace::Model>, ServiceError> {
        Ok(workspace::Entity::find()
            .order_by_asc(workspace::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn get_host(&self, id: Uuid) -> Result<Option<host::Model>, ServiceError> {
        Ok(host::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_host(&self, workspace_id: Uuid, ip: &str, os: &str, description: &str) -> Result<host::Model, ServiceError> {
        Ok(host::create(&self.db, workspace_id, ip, os, description).await?)
    }

    async fn list_hosts(&self, workspace_id: Uuid) -> Result<Vec<host::Model>, ServiceError> {
        Ok(host::Entity::find()
            .filter(host::Column::WorkspaceId.eq(workspace_id))
            .order_by_asc(host::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn list_services(&self, workspace_id: Uuid, page: Option<Pagination>) -> Result<Vec<service::Model>, ServiceError> {
        let query = service::Entity::find()
            .filter(service::Column::WorkspaceId.eq(workspace_id))
            .order_by_asc(service::Column::CreatedAt)
            .order_by_asc(service::Column::Id);
        let rows = match page {
            Some(page) => {
                let (page_idx, per_page) = page.normalize();
                query.paginate(&self.db, per_page).fetch_page(page_idx).await?
            }
            None => query.all(&self.db).await?,
        };
        Ok(rows)
    }

    async fn get_service(&self, workspace_id: Uuid, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
        Ok(service::Entity::find_by_id(id)
            .filter(service::Column::WorkspaceId.eq(workspace_id))
            .one(&self.db)
            .await?)
    }

    async fn find_service_on_host(&self, host_id: Uuid, port: i32, protocol: &str) -> Result<Option<service::Model>, ServiceError> {
        Ok(service::Entity::find()
            .filter(service::Column::HostId.eq(host_id))
            .filter(service::Column::Port.eq(port))
            .filter(service::Column::Protocol.eq(protocol))
            .one(&self.db)
            .await?)
    }

    async fn insert_service(&self, new: service::NewService) -> Result<service::Model, ServiceError> {
        Ok(service::create(&self.db, new).await?)
    }

    async fn update_service(&self, updated: &service::Model) -> Result<Option<service::Model>, ServiceError> {
        Ok(service::save_mutable_fields(&self.db, updated).await?)
    }

    async fn delete_service(&self, workspace_id: Uuid, id: Uuid) -> Result<bool, ServiceError> {
        let res = service::Entity::delete_many()
            .filter(service::Column::Id.eq(id))
            .filter(service::Column::WorkspaceId.eq(workspace_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
