//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::notification::NotificationRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::station::StationRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::notification_repository::SeaOrmNotificationRepository;
use super::station_repository::SeaOrmStationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let station = repos.stations().find_by_id("ST001").await?;
/// let overlapping = repos.bookings().find_overlapping("ST001", start, end).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    stations: SeaOrmStationRepository,
    notifications: SeaOrmNotificationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone()),
            stations: SeaOrmStationRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }
}
