//! Create notifications table
//!
//! Stores user notifications with related-entity references (reminder
//! idempotency lookups) and expiry timestamps (cleanup sweep).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientNic)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).string().not_null())
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(ColumnDef::new(Notifications::RelatedEntityId).string())
                    .col(ColumnDef::new(Notifications::RelatedEntityType).string())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsDelivered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::Priority)
                            .string()
                            .not_null()
                            .default("Normal"),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::ReadAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notifications::DeliveredAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notifications::ExpiresAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notifications::Metadata).json())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_recipient")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientNic)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_related_entity")
                    .table(Notifications::Table)
                    .col(Notifications::RelatedEntityId)
                    .col(Notifications::RelatedEntityType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_expires")
                    .table(Notifications::Table)
                    .col(Notifications::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Notifications {
    Table,
    Id,
    RecipientNic,
    Title,
    Message,
    Kind,
    RelatedEntityId,
    RelatedEntityType,
    IsRead,
    IsDelivered,
    Priority,
    CreatedAt,
    ReadAt,
    DeliveredAt,
    ExpiresAt,
    Metadata,
}
