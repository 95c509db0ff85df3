//! Create bookings table
//!
//! Stores charging slot bookings with status, QR token and pricing.
//! The station/status/time indexes back the overlap and reminder queries.

use sea_orm_migration::prelude::*;

use super::m20250901_000001_create_charging_stations::ChargingStations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::OwnerNic).string().not_null())
                    .col(ColumnDef::new(Bookings::StationId).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Bookings::QrToken).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::TotalAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::ConfirmedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::CancelledAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_station")
                            .from(Bookings::Table, Bookings::StationId)
                            .to(ChargingStations::Table, ChargingStations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_station")
                    .table(Bookings::Table)
                    .col(Bookings::StationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_owner")
                    .table(Bookings::Table)
                    .col(Bookings::OwnerNic)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status_start")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .col(Bookings::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    OwnerNic,
    StationId,
    StartTime,
    EndTime,
    Status,
    QrToken,
    TotalAmount,
    CreatedAt,
    UpdatedAt,
    ConfirmedAt,
    CancelledAt,
}
