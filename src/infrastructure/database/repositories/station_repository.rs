//! SeaORM implementation of StationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::station::{ChargingStation, StationRepository, StationStatus, StationType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::station;

pub struct SeaOrmStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: station::Model) -> ChargingStation {
    ChargingStation {
        id: m.id,
        name: m.name,
        location: m.location,
        station_type: StationType::from_str(&m.station_type),
        total_slots: m.total_slots,
        available_slots: m.available_slots,
        status: StationStatus::from_str(&m.status),
        price_per_hour: m.price_per_hour,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: &ChargingStation) -> station::ActiveModel {
    station::ActiveModel {
        id: Set(s.id.clone()),
        name: Set(s.name.clone()),
        location: Set(s.location.clone()),
        station_type: Set(s.station_type.as_str().to_string()),
        total_slots: Set(s.total_slots),
        available_slots: Set(s.available_slots),
        status: Set(s.status.as_str().to_string()),
        price_per_hour: Set(s.price_per_hour),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn not_found(id: &str) -> DomainError {
    DomainError::NotFound {
        entity: "ChargingStation",
        field: "id",
        value: id.to_string(),
    }
}

// ── StationRepository impl ──────────────────────────────────────

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn create(&self, mut s: ChargingStation) -> DomainResult<ChargingStation> {
        let now = Utc::now();
        s.id = Uuid::new_v4().to_string();
        s.created_at = now;
        s.updated_at = now;

        debug!(station_id = %s.id, "Saving charging station");

        domain_to_active(&s).insert(&self.db).await.map_err(db_err)?;
        Ok(s)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<ChargingStation>> {
        let models = station::Entity::find()
            .order_by_asc(station::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active(&self) -> DomainResult<Vec<ChargingStation>> {
        let models = station::Entity::find()
            .filter(station::Column::Status.eq(StationStatus::Active.as_str()))
            .order_by_asc(station::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, mut s: ChargingStation) -> DomainResult<ChargingStation> {
        debug!(station_id = %s.id, "Updating charging station");

        let existing = station::Entity::find_by_id(&s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(not_found(&s.id));
        }

        s.updated_at = Utc::now();
        domain_to_active(&s).update(&self.db).await.map_err(db_err)?;
        Ok(s)
    }

    async fn update_status(&self, id: &str, status: StationStatus) -> DomainResult<()> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| not_found(id))?;

        let mut active: station::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn adjust_available_slots(&self, id: &str, delta: i32) -> DomainResult<()> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| not_found(id))?;

        // Clamp keeps the advisory counter inside [0, total_slots] even if
        // a paired increment/decrement was lost
        let clamped = (model.available_slots + delta).clamp(0, model.total_slots);

        let mut active: station::ActiveModel = model.into();
        active.available_slots = Set(clamped);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = station::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
