use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Host: index on workspace_id
        manager
            .create_index(
                Index::create()
                    .name("idx_host_workspace")
                    .table(Host::Table)
                    .col(Host::WorkspaceId)
                    .to_owned(),
            )
            .await?;

        // Service: listing filters by workspace
        manager
            .create_index(
                Index::create()
                    .name("idx_service_workspace")
                    .table(Service::Table)
                    .col(Service::WorkspaceId)
                    .to_owned(),
            )
            .await?;

        // Service: one (host, port, protocol) per host
        manager
            .create_index(
                Index::create()
                    .name("uniq_service_host_port_protocol")
                    .table(Service::Table)
                    .col(Service::HostId)
                    .col(Service::Port)
                    .col(Service::Protocol)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("uniq_service_host_port_protocol").table(Service::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_service_workspace").table(Service::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_host_workspace").table(Host::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Host { Table, WorkspaceId }

#[derive(DeriveIden)]
enum Service { Table, WorkspaceId, HostId, Port, Protocol }
