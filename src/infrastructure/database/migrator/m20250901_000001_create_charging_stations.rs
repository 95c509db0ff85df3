//! Create charging_stations table
//!
//! Stores station capacity, pricing and operating status. The
//! available_slots counter is advisory; bookings are the source of truth.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChargingStations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChargingStations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChargingStations::Name).string().not_null())
                    .col(
                        ColumnDef::new(ChargingStations::Location)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::StationType)
                            .string()
                            .not_null()
                            .default("AC"),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::TotalSlots)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::AvailableSlots)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::PricePerHour)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_charging_stations_status")
                    .table(ChargingStations::Table)
                    .col(ChargingStations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChargingStations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ChargingStations {
    Table,
    Id,
    Name,
    Location,
    StationType,
    TotalSlots,
    AvailableSlots,
    Status,
    PricePerHour,
    CreatedAt,
    UpdatedAt,
}
