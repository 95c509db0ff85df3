//! Booking lifecycle business logic
//!
//! Orchestrates creation, update, confirmation and cancellation of
//! bookings: time-window rules, the capacity gate (overlap count against
//! station slots), the advisory available-slots counter, and best-effort
//! notification side effects.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::notifications::{NotificationEmitter, NotificationRequest};
use crate::domain::{
    Booking, BookingStatus, DomainResult, Principal, RepositoryProvider,
};
use crate::shared::errors::DomainError;

use super::validation::{booking_amount, validate_booking_times, MODIFICATION_LOCKOUT_HOURS};

/// New booking input, owner identity supplied separately
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub station_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Partial booking update; absent fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateBookingRequest {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}

/// Service for booking lifecycle operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    emitter: NotificationEmitter,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, emitter: NotificationEmitter) -> Self {
        Self { repos, emitter }
    }

    /// Create a booking for the calling owner.
    ///
    /// The `available_slots > 0` check is a cheap pre-filter; the overlap
    /// count against `total_slots` is the authoritative capacity gate.
    pub async fn create_booking(
        &self,
        principal: &Principal,
        req: CreateBookingRequest,
    ) -> DomainResult<Booking> {
        let owner_nic = principal.owner_nic().ok_or_else(|| {
            DomainError::Forbidden("Only EV owners can create bookings".to_string())
        })?;

        validate_booking_times(req.start_time, req.end_time, Utc::now())?;

        let station = self
            .repos
            .stations()
            .find_by_id(&req.station_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "ChargingStation",
                field: "id",
                value: req.station_id.clone(),
            })?;

        if !station.is_active() {
            return Err(DomainError::Validation(
                "Charging station is not active".to_string(),
            ));
        }

        if station.available_slots <= 0 {
            return Err(DomainError::Validation(
                "No available slots at this charging station".to_string(),
            ));
        }

        let overlapping = self
            .repos
            .bookings()
            .find_overlapping(&req.station_id, req.start_time, req.end_time)
            .await?;

        if overlapping.len() as i32 >= station.total_slots {
            return Err(DomainError::Validation(
                "No available slots for the requested time period".to_string(),
            ));
        }

        let total_amount = booking_amount(req.start_time, req.end_time, station.price_per_hour);

        let booking = Booking::new(
            owner_nic,
            &req.station_id,
            req.start_time,
            req.end_time,
            generate_qr_token(),
            total_amount,
        );
        let created = self.repos.bookings().create(booking).await?;

        // Advisory counter only; a failure here must not unwind the booking
        if let Err(e) = self
            .repos
            .stations()
            .adjust_available_slots(&req.station_id, -1)
            .await
        {
            warn!(
                station_id = %req.station_id,
                error = %e,
                "Failed to decrement available slots"
            );
        }

        info!(
            booking_id = %created.id,
            station_id = %req.station_id,
            owner = %created.owner_nic,
            "Booking created"
        );

        Ok(created)
    }

    /// Update an Active booking's time window (owner action).
    ///
    /// Rejected inside the 12-hour lockout window. The overlap re-check
    /// excludes the booking being updated. Status overrides other than
    /// `Active` are rejected; confirm/cancel own those transitions.
    pub async fn update_booking(
        &self,
        principal: &Principal,
        id: &str,
        req: UpdateBookingRequest,
    ) -> DomainResult<Booking> {
        let owner_nic = principal.owner_nic().ok_or_else(|| {
            DomainError::Forbidden("Only EV owners can update bookings".to_string())
        })?;

        let mut booking = self.load_booking(id).await?;

        if booking.owner_nic != owner_nic {
            return Err(DomainError::Unauthorized(
                "You can only update your own bookings".to_string(),
            ));
        }

        let now = Utc::now();

        if booking.starts_within(Duration::hours(MODIFICATION_LOCKOUT_HOURS), now) {
            return Err(DomainError::Validation(format!(
                "Cannot modify booking within {} hours of start time",
                MODIFICATION_LOCKOUT_HOURS
            )));
        }

        if booking.status != BookingStatus::Active {
            return Err(DomainError::Validation(
                "Only active bookings can be updated".to_string(),
            ));
        }

        if req.start_time.is_some() || req.end_time.is_some() {
            let new_start = req.start_time.unwrap_or(booking.start_time);
            let new_end = req.end_time.unwrap_or(booking.end_time);

            validate_booking_times(new_start, new_end, now)?;

            let overlapping = self
                .repos
                .bookings()
                .find_overlapping(&booking.station_id, new_start, new_end)
                .await?;
            let conflicting = overlapping.iter().filter(|b| b.id != booking.id).count();

            let station = self
                .repos
                .stations()
                .find_by_id(&booking.station_id)
                .await?
                .ok_or_else(|| DomainError::NotFound {
                    entity: "ChargingStation",
                    field: "id",
                    value: booking.station_id.clone(),
                })?;

            if conflicting as i32 >= station.total_slots {
                return Err(DomainError::Validation(
                    "No available slots for the requested time period".to_string(),
                ));
            }

            booking.start_time = new_start;
            booking.end_time = new_end;
            booking.total_amount = booking_amount(new_start, new_end, station.price_per_hour);
        }

        if let Some(status) = req.status {
            if status != BookingStatus::Active {
                return Err(DomainError::Validation(
                    "Booking status cannot be changed through update; use the confirm or cancel operations".to_string(),
                ));
            }
        }

        let updated = self.repos.bookings().update(booking).await?;

        info!(booking_id = %id, "Booking updated");

        Ok(updated)
    }

    /// Confirm an Active booking (operator action, no ownership check)
    pub async fn confirm_booking(&self, principal: &Principal, id: &str) -> DomainResult<bool> {
        if !principal.is_staff() {
            return Err(DomainError::Forbidden(
                "Operator or backoffice role required".to_string(),
            ));
        }

        let mut booking = self.load_booking(id).await?;

        if booking.status != BookingStatus::Active {
            return Err(DomainError::Validation(
                "Only active bookings can be confirmed".to_string(),
            ));
        }

        booking.confirm(Utc::now());
        let confirmed = self.repos.bookings().update(booking).await?;

        info!(booking_id = %id, "Booking confirmed");

        // Best-effort; the confirmation above is the source of truth
        self.emitter.emit(NotificationRequest::BookingConfirmed {
            recipient_nic: confirmed.owner_nic,
            booking_id: confirmed.id,
            station_id: confirmed.station_id,
            start_time: confirmed.start_time,
            end_time: confirmed.end_time,
        });

        Ok(true)
    }

    /// Cancel a booking (owner action, 12-hour lockout applies)
    pub async fn cancel_booking(&self, principal: &Principal, id: &str) -> DomainResult<bool> {
        let owner_nic = principal.owner_nic().ok_or_else(|| {
            DomainError::Forbidden("Only EV owners can cancel their bookings".to_string())
        })?;

        let booking = self.load_booking(id).await?;

        if booking.owner_nic != owner_nic {
            return Err(DomainError::Unauthorized(
                "You can only cancel your own bookings".to_string(),
            ));
        }

        if booking.starts_within(Duration::hours(MODIFICATION_LOCKOUT_HOURS), Utc::now()) {
            return Err(DomainError::Validation(format!(
                "Cannot cancel booking within {} hours of start time",
                MODIFICATION_LOCKOUT_HOURS
            )));
        }

        self.cancel_and_release(booking, "Cancelled by user".to_string())
            .await?;

        info!(booking_id = %id, "Booking cancelled");

        Ok(true)
    }

    /// Cancel a booking as an operator: no lockout window, any booking
    pub async fn cancel_booking_by_operator(
        &self,
        principal: &Principal,
        id: &str,
        reason: &str,
    ) -> DomainResult<bool> {
        if !principal.is_staff() {
            return Err(DomainError::Forbidden(
                "Operator or backoffice role required".to_string(),
            ));
        }

        let booking = self.load_booking(id).await?;

        let full_reason = if reason.is_empty() {
            "Cancelled by station operator".to_string()
        } else {
            format!("Cancelled by station operator - {}", reason)
        };

        self.cancel_and_release(booking, full_reason).await?;

        info!(booking_id = %id, reason, "Booking cancelled by operator");

        Ok(true)
    }

    /// Shared tail of both cancellation paths: state transition, slot
    /// return, cancellation notice.
    async fn cancel_and_release(&self, mut booking: Booking, reason: String) -> DomainResult<()> {
        if !booking.is_cancellable() {
            return Err(DomainError::Validation(
                "Only active or confirmed bookings can be cancelled".to_string(),
            ));
        }

        booking.cancel(Utc::now());
        let cancelled = self.repos.bookings().update(booking).await?;

        // Return the slot to the pool, mirroring the decrement at create
        if let Err(e) = self
            .repos
            .stations()
            .adjust_available_slots(&cancelled.station_id, 1)
            .await
        {
            warn!(
                station_id = %cancelled.station_id,
                error = %e,
                "Failed to return slot to available pool"
            );
        }

        self.emitter.emit(NotificationRequest::BookingCancelled {
            recipient_nic: cancelled.owner_nic,
            booking_id: cancelled.id,
            station_id: cancelled.station_id,
            reason,
        });

        Ok(())
    }

    // ── Read paths ──────────────────────────────────────────────

    pub async fn get_booking(&self, id: &str) -> DomainResult<Booking> {
        self.load_booking(id).await
    }

    pub async fn bookings_for_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_by_owner(owner_nic).await
    }

    pub async fn bookings_for_station(&self, station_id: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_by_station(station_id).await
    }

    pub async fn all_bookings(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    async fn load_booking(&self, id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }
}

fn generate_qr_token() -> String {
    Uuid::new_v4().simple().to_string().to_uppercase()
}

// ── Tests ──────────────────────────────────────────────────────
