//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        owner_nic: m.owner_nic,
        station_id: m.station_id,
        start_time: m.start_time,
        end_time: m.end_time,
        status: BookingStatus::from_str(&m.status),
        qr_token: m.qr_token,
        total_amount: m.total_amount,
        created_at: m.created_at,
        updated_at: m.updated_at,
        confirmed_at: m.confirmed_at,
        cancelled_at: m.cancelled_at,
    }
}

fn domain_to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id.clone()),
        owner_nic: Set(b.owner_nic.clone()),
        station_id: Set(b.station_id.clone()),
        start_time: Set(b.start_time),
        end_time: Set(b.end_time),
        status: Set(b.status.as_str().to_string()),
        qr_token: Set(b.qr_token.clone()),
        total_amount: Set(b.total_amount),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
        confirmed_at: Set(b.confirmed_at),
        cancelled_at: Set(b.cancelled_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn occupying_statuses() -> Vec<&'static str> {
    vec![
        BookingStatus::Active.as_str(),
        BookingStatus::Confirmed.as_str(),
    ]
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, mut b: Booking) -> DomainResult<Booking> {
        let now = Utc::now();
        b.id = Uuid::new_v4().to_string();
        b.created_at = now;
        b.updated_at = now;

        debug!(booking_id = %b.id, "Saving booking");

        domain_to_active(&b).insert(&self.db).await.map_err(db_err)?;
        Ok(b)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::OwnerNic.eq(owner_nic))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::StationId.eq(station_id))
            .order_by_desc(booking::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, mut b: Booking) -> DomainResult<Booking> {
        debug!(booking_id = %b.id, "Updating booking");

        let existing = booking::Entity::find_by_id(&b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: b.id,
            });
        }

        b.updated_at = Utc::now();
        domain_to_active(&b).update(&self.db).await.map_err(db_err)?;
        Ok(b)
    }

    async fn find_overlapping(
        &self,
        station_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        // Three half-open overlap cases: existing spans the new start,
        // existing spans the new end, existing contained in the new window
        let overlap = Condition::any()
            .add(
                Condition::all()
                    .add(booking::Column::StartTime.lte(start))
                    .add(booking::Column::EndTime.gt(start)),
            )
            .add(
                Condition::all()
                    .add(booking::Column::StartTime.lt(end))
                    .add(booking::Column::EndTime.gte(end)),
            )
            .add(
                Condition::all()
                    .add(booking::Column::StartTime.gte(start))
                    .add(booking::Column::EndTime.lte(end)),
            );

        let models = booking::Entity::find()
            .filter(booking::Column::StationId.eq(station_id))
            .filter(booking::Column::Status.is_in(occupying_statuses()))
            .filter(overlap)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_active_for_station(&self, station_id: &str) -> DomainResult<u64> {
        booking::Entity::find()
            .filter(booking::Column::StationId.eq(station_id))
            .filter(booking::Column::Status.is_in(occupying_statuses()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_upcoming_confirmed(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Confirmed.as_str()))
            .filter(booking::Column::StartTime.gte(from))
            .filter(booking::Column::StartTime.lte(to))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
