//! Create `host` table with FK to `workspace`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Host::Table)
                    .if_not_exists()
                    .col(uuid(Host::Id).primary_key())
                    .col(uuid(Host::WorkspaceId).not_null())
                    .col(string_len(Host::Ip, 255).not_null())
                    .col(string_len(Host::Os, 255).not_null())
                    .col(text(Host::Description).not_null())
                    .col(timestamp_with_time_zone(Host::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Host::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_host_workspace")
                            .from(Host::Table, Host::WorkspaceId)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Host::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Host { Table, Id, WorkspaceId, Ip, Os, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Workspace { Table, Id }
