//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_charging_stations;
mod m20250901_000002_create_bookings;
mod m20250901_000003_create_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_charging_stations::Migration),
            Box::new(m20250901_000002_create_bookings::Migration),
            Box::new(m20250901_000003_create_notifications::Migration),
        ]
    }
}
