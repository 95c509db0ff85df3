//! Station repository interface

use async_trait::async_trait;

use super::model::{ChargingStation, StationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Persist a new station; assigns the id and created/updated stamps
    async fn create(&self, station: ChargingStation) -> DomainResult<ChargingStation>;

    /// Find station by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>>;

    /// All stations
    async fn find_all(&self) -> DomainResult<Vec<ChargingStation>>;

    /// Stations with status Active
    async fn find_active(&self) -> DomainResult<Vec<ChargingStation>>;

    /// Replace an existing station; bumps `updated_at`
    async fn update(&self, station: ChargingStation) -> DomainResult<ChargingStation>;

    /// Set a station's operating status
    async fn update_status(&self, id: &str, status: StationStatus) -> DomainResult<()>;

    /// Atomically add `delta` to `available_slots`, clamped to
    /// `[0, total_slots]`. Missing station reports NotFound.
    async fn adjust_available_slots(&self, id: &str, delta: i32) -> DomainResult<()>;

    /// Remove a station record
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
