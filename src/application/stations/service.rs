//! Charging station business logic
//!
//! CRUD-adjacent operations the booking engine depends on for its
//! capacity invariants, most importantly the deactivation guard.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    ChargingStation, DomainResult, RepositoryProvider, StationStatus, StationType,
};
use crate::shared::errors::DomainError;

/// New station input
#[derive(Debug, Clone)]
pub struct CreateStationRequest {
    pub name: String,
    pub location: String,
    pub station_type: StationType,
    pub total_slots: i32,
    pub price_per_hour: Decimal,
}

/// Partial station update; absent fields keep their current value.
/// Status changes go through activate/deactivate so the booking guard
/// cannot be bypassed.
#[derive(Debug, Clone, Default)]
pub struct UpdateStationRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub station_type: Option<StationType>,
    pub total_slots: Option<i32>,
    pub price_per_hour: Option<Decimal>,
}

/// Service for station management operations
pub struct StationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register a new station; all slots start available
    pub async fn create_station(&self, req: CreateStationRequest) -> DomainResult<ChargingStation> {
        if req.total_slots <= 0 {
            return Err(DomainError::Validation(
                "Station must have at least one slot".to_string(),
            ));
        }

        let station = ChargingStation::new(
            req.name,
            req.location,
            req.station_type,
            req.total_slots,
            req.price_per_hour,
        );
        let created = self.repos.stations().create(station).await?;

        info!(station_id = %created.id, name = %created.name, "Charging station created");

        Ok(created)
    }

    pub async fn get_station(&self, id: &str) -> DomainResult<ChargingStation> {
        self.load_station(id).await
    }

    pub async fn all_stations(&self) -> DomainResult<Vec<ChargingStation>> {
        self.repos.stations().find_all().await
    }

    pub async fn active_stations(&self) -> DomainResult<Vec<ChargingStation>> {
        self.repos.stations().find_active().await
    }

    /// Update station details.
    ///
    /// Resizing capacity shifts `available_slots` by the same delta,
    /// floored at zero, so slots already held by bookings stay accounted.
    pub async fn update_station(
        &self,
        id: &str,
        req: UpdateStationRequest,
    ) -> DomainResult<ChargingStation> {
        let mut station = self.load_station(id).await?;

        if let Some(name) = req.name {
            station.name = name;
        }
        if let Some(location) = req.location {
            station.location = location;
        }
        if let Some(station_type) = req.station_type {
            station.station_type = station_type;
        }
        if let Some(total_slots) = req.total_slots {
            if total_slots <= 0 {
                return Err(DomainError::Validation(
                    "Station must have at least one slot".to_string(),
                ));
            }
            let difference = total_slots - station.total_slots;
            station.total_slots = total_slots;
            station.available_slots = (station.available_slots + difference).max(0);
        }
        if let Some(price_per_hour) = req.price_per_hour {
            station.price_per_hour = price_per_hour;
        }

        let updated = self.repos.stations().update(station).await?;

        info!(station_id = %id, "Charging station updated");

        Ok(updated)
    }

    /// Reopen a station for bookings
    pub async fn activate_station(&self, id: &str) -> DomainResult<bool> {
        self.load_station(id).await?;
        self.repos
            .stations()
            .update_status(id, StationStatus::Active)
            .await?;

        info!(station_id = %id, "Charging station activated");

        Ok(true)
    }

    /// Take a station out of service.
    ///
    /// Refused while the station still has Active/Confirmed bookings;
    /// those must be cancelled or completed first.
    pub async fn deactivate_station(&self, id: &str) -> DomainResult<bool> {
        self.load_station(id).await?;

        let active_bookings = self.repos.bookings().count_active_for_station(id).await?;
        if active_bookings > 0 {
            return Err(DomainError::Validation(
                "Cannot deactivate station with active bookings".to_string(),
            ));
        }

        self.repos
            .stations()
            .update_status(id, StationStatus::Inactive)
            .await?;

        info!(station_id = %id, "Charging station deactivated");

        Ok(true)
    }

    async fn load_station(&self, id: &str) -> DomainResult<ChargingStation> {
        self.repos
            .stations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ChargingStation",
                field: "id",
                value: id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Booking;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use chrono::{Duration, Utc};

    fn service() -> (Arc<InMemoryRepositoryProvider>, StationService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = StationService::new(repos.clone());
        (repos, service)
    }

    fn sample_request() -> CreateStationRequest {
        CreateStationRequest {
            name: "Negombo Beach".to_string(),
            location: "Negombo".to_string(),
            station_type: StationType::Dc,
            total_slots: 3,
            price_per_hour: Decimal::from(450),
        }
    }

    #[tokio::test]
    async fn created_station_is_active_with_full_capacity() {
        let (_, service) = service();
        let station = service.create_station(sample_request()).await.unwrap();

        assert!(!station.id.is_empty());
        assert_eq!(station.status, StationStatus::Active);
        assert_eq!(station.available_slots, 3);
    }

    #[tokio::test]
    async fn zero_slot_station_is_rejected() {
        let (_, service) = service();
        let err = service
            .create_station(CreateStationRequest {
                total_slots: 0,
                ..sample_request()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn deactivate_refused_while_bookings_occupy_slots() {
        let (repos, service) = service();
        let station = service.create_station(sample_request()).await.unwrap();

        let start = Utc::now() + Duration::hours(20);
        repos
            .bookings()
            .create(Booking::new(
                "NIC1",
                station.id.clone(),
                start,
                start + Duration::hours(2),
                "QR",
                Decimal::from(900),
            ))
            .await
            .unwrap();

        let err = service.deactivate_station(&station.id).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(msg) if msg.contains("active bookings"))
        );
    }

    #[tokio::test]
    async fn deactivate_and_reactivate_roundtrip() {
        let (_, service) = service();
        let station = service.create_station(sample_request()).await.unwrap();

        service.deactivate_station(&station.id).await.unwrap();
        assert_eq!(
            service.get_station(&station.id).await.unwrap().status,
            StationStatus::Inactive
        );
        assert!(service.active_stations().await.unwrap().is_empty());
        assert_eq!(service.all_stations().await.unwrap().len(), 1);

        service.activate_station(&station.id).await.unwrap();
        assert_eq!(
            service.get_station(&station.id).await.unwrap().status,
            StationStatus::Active
        );
    }

    #[tokio::test]
    async fn resizing_capacity_shifts_available_slots() {
        let (repos, service) = service();
        let station = service.create_station(sample_request()).await.unwrap();

        // One slot in use
        repos
            .stations()
            .adjust_available_slots(&station.id, -1)
            .await
            .unwrap();

        let updated = service
            .update_station(
                &station.id,
                UpdateStationRequest {
                    total_slots: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.total_slots, 5);
        assert_eq!(updated.available_slots, 4);

        // Shrinking below the in-use count floors the counter at zero
        let updated = service
            .update_station(
                &station.id,
                UpdateStationRequest {
                    total_slots: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.total_slots, 1);
        assert_eq!(updated.available_slots, 0);
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let (_, service) = service();
        let station = service.create_station(sample_request()).await.unwrap();

        let updated = service
            .update_station(
                &station.id,
                UpdateStationRequest {
                    price_per_hour: Some(Decimal::from(600)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price_per_hour, Decimal::from(600));
        assert_eq!(updated.name, station.name);
        assert_eq!(updated.total_slots, station.total_slots);
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let (_, service) = service();
        let err = service.deactivate_station("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
