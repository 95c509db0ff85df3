//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Booking;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking; assigns the id and created/updated stamps
    async fn create(&self, booking: Booking) -> DomainResult<Booking>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// All bookings for an owner, newest first
    async fn find_by_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings for a station, by start time descending
    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Replace an existing booking; bumps `updated_at`
    async fn update(&self, booking: Booking) -> DomainResult<Booking>;

    /// Active/Confirmed bookings at a station competing with `[start, end)`.
    ///
    /// Half-open boundaries: a booking ending exactly at `start` (or
    /// starting exactly at `end`) is not returned.
    async fn find_overlapping(
        &self,
        station_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;

    /// Count of Active/Confirmed bookings at a station
    async fn count_active_for_station(&self, station_id: &str) -> DomainResult<u64>;

    /// Confirmed bookings with `from <= start_time <= to` (reminder sweep)
    async fn find_upcoming_confirmed(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;

    /// Remove a booking record (peripheral CRUD, not used by the engine)
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
