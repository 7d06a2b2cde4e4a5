//! Create `service` table with FKs to `host` and `workspace`.
//!
//! Both references are kept so listings filter on `workspace_id` directly;
//! the service layer keeps them consistent.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::WorkspaceId).not_null())
                    .col(uuid(Service::HostId).not_null())
                    .col(string_len(Service::Name, 255).not_null())
                    .col(integer(Service::Port).not_null())
                    .col(string_len(Service::Protocol, 32).not_null())
                    .col(string_len(Service::Status, 16).not_null())
                    .col(text(Service::Description).not_null())
                    .col(boolean(Service::Owned).not_null())
                    .col(string_len(Service::Owner, 255).not_null())
                    .col(string_len(Service::Version, 255).not_null())
                    .col(string_len(Service::Creator, 255).not_null())
                    .col(string_len(Service::UpdateUser, 255).not_null())
                    .col(integer(Service::UpdateAction).not_null())
                    .col(string_len(Service::UpdateControllerAction, 255).not_null())
                    .col(
                        ColumnDef::new(Service::CommandId)
                            .big_integer()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_host")
                            .from(Service::Table, Service::HostId)
                            .to(Host::Table, Host::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_workspace")
                            .from(Service::Table, Service::WorkspaceId)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    WorkspaceId,
    HostId,
    Name,
    Port,
    Protocol,
    Status,
    Description,
    Owned,
    Owner,
    Version,
    Creator,
    UpdateUser,
    UpdateAction,
    UpdateControllerAction,
    CommandId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Host { Table, Id }

#[derive(DeriveIden)]
enum Workspace { Table, Id }
