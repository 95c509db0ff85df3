//! In-memory repository provider for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingRepository, BookingStatus, ChargingStation, DomainError, DomainResult,
    Notification, NotificationRepository, RepositoryProvider, StationRepository, StationStatus,
};

fn next_id() -> String {
    Uuid::new_v4().to_string()
}

// ── Bookings ────────────────────────────────────────────────────

pub struct InMemoryBookingRepository {
    bookings: DashMap<String, Booking>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, mut booking: Booking) -> DomainResult<Booking> {
        let now = Utc::now();
        booking.id = next_id();
        booking.created_at = now;
        booking.updated_at = now;
        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn find_by_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.owner_nic == owner_nic)
            .map(|b| b.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.station_id == station_id)
            .map(|b| b.clone())
            .collect();
        found.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(found)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self.bookings.iter().map(|b| b.clone()).collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update(&self, mut booking: Booking) -> DomainResult<Booking> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking.id,
            });
        }
        booking.updated_at = Utc::now();
        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn find_overlapping(
        &self,
        station_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| {
                b.station_id == station_id && b.occupies_slot() && b.overlaps(start, end)
            })
            .map(|b| b.clone())
            .collect())
    }

    async fn count_active_for_station(&self, station_id: &str) -> DomainResult<u64> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.station_id == station_id && b.occupies_slot())
            .count() as u64)
    }

    async fn find_upcoming_confirmed(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| {
                b.status == BookingStatus::Confirmed
                    && b.start_time >= from
                    && b.start_time <= to
            })
            .map(|b| b.clone())
            .collect())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.bookings.remove(id).ok_or_else(|| DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

// ── Stations ────────────────────────────────────────────────────

pub struct InMemoryStationRepository {
    stations: DashMap<String, ChargingStation>,
}

impl InMemoryStationRepository {
    pub fn new() -> Self {
        Self {
            stations: DashMap::new(),
        }
    }
}

impl Default for InMemoryStationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationRepository for InMemoryStationRepository {
    async fn create(&self, mut station: ChargingStation) -> DomainResult<ChargingStation> {
        let now = Utc::now();
        station.id = next_id();
        station.created_at = now;
        station.updated_at = now;
        self.stations.insert(station.id.clone(), station.clone());
        Ok(station)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>> {
        Ok(self.stations.get(id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ChargingStation>> {
        Ok(self.stations.iter().map(|s| s.clone()).collect())
    }

    async fn find_active(&self) -> DomainResult<Vec<ChargingStation>> {
        Ok(self
            .stations
            .iter()
            .filter(|s| s.status == StationStatus::Active)
            .map(|s| s.clone())
            .collect())
    }

    async fn update(&self, mut station: ChargingStation) -> DomainResult<ChargingStation> {
        if !self.stations.contains_key(&station.id) {
            return Err(DomainError::NotFound {
                entity: "ChargingStation",
                field: "id",
                value: station.id,
            });
        }
        station.updated_at = Utc::now();
        self.stations.insert(station.id.clone(), station.clone());
        Ok(station)
    }

    async fn update_status(&self, id: &str, status: StationStatus) -> DomainResult<()> {
        let mut entry = self.stations.get_mut(id).ok_or_else(|| DomainError::NotFound {
            entity: "ChargingStation",
            field: "id",
            value: id.to_string(),
        })?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn adjust_available_slots(&self, id: &str, delta: i32) -> DomainResult<()> {
        let mut entry = self.stations.get_mut(id).ok_or_else(|| DomainError::NotFound {
            entity: "ChargingStation",
            field: "id",
            value: id.to_string(),
        })?;
        entry.available_slots = (entry.available_slots + delta).clamp(0, entry.total_slots);
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.stations.remove(id).ok_or_else(|| DomainError::NotFound {
            entity: "ChargingStation",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

// ── Notifications ───────────────────────────────────────────────

pub struct InMemoryNotificationRepository {
    notifications: DashMap<String, Notification>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self {
            notifications: DashMap::new(),
        }
    }
}

impl Default for InMemoryNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, mut notification: Notification) -> DomainResult<Notification> {
        notification.id = next_id();
        notification.created_at = Utc::now();
        self.notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    async fn find_by_recipient(&self, recipient_nic: &str) -> DomainResult<Vec<Notification>> {
        let mut found: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.recipient_nic == recipient_nic)
            .map(|n| n.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_related_entity(
        &self,
        entity_id: &str,
        entity_type: &str,
    ) -> DomainResult<Vec<Notification>> {
        Ok(self
            .notifications
            .iter()
            .filter(|n| {
                n.related_entity_id.as_deref() == Some(entity_id)
                    && n.related_entity_type.as_deref() == Some(entity_type)
            })
            .map(|n| n.clone())
            .collect())
    }

    async fn delete_expired(&self) -> DomainResult<u64> {
        let now = Utc::now();
        let expired: Vec<String> = self
            .notifications
            .iter()
            .filter(|n| n.is_expired(now))
            .map(|n| n.id.clone())
            .collect();

        let count = expired.len() as u64;
        for id in expired {
            self.notifications.remove(&id);
        }
        Ok(count)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    bookings: InMemoryBookingRepository,
    stations: InMemoryStationRepository,
    notifications: InMemoryNotificationRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            bookings: InMemoryBookingRepository::new(),
            stations: InMemoryStationRepository::new(),
            notifications: InMemoryNotificationRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

// ── Tests ──────────────────────────────────────────────────────
