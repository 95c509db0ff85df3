//! Booking domain entity

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Booking status
///
/// Transitions are one-directional: Active → Confirmed, and
/// Active/Confirmed → Cancelled. Completed and NoShow are terminal states
/// written by station-side settlement, never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Booking created by the owner, awaiting operator confirmation
    Active,
    /// Confirmed by a station operator
    Confirmed,
    /// Charging session took place
    Completed,
    /// Cancelled by the owner or an operator
    Cancelled,
    /// Owner never showed up for the slot
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "NoShow",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            "Confirmed" => Self::Confirmed,
            "Completed" => Self::Completed,
            "NoShow" => Self::NoShow,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charging slot booking
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID (assigned by the store on create)
    pub id: String,
    /// NIC of the EV owner who holds the booking
    pub owner_nic: String,
    /// Station the slot is booked at
    pub station_id: String,
    /// Slot start (UTC)
    pub start_time: DateTime<Utc>,
    /// Slot end (UTC), exclusive
    pub end_time: DateTime<Utc>,
    /// Current status
    pub status: BookingStatus,
    /// Opaque token for on-site redemption, generated once at create
    pub qr_token: String,
    /// Total price for the slot, fixed-point
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(
        owner_nic: impl Into<String>,
        station_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        qr_token: impl Into<String>,
        total_amount: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            owner_nic: owner_nic.into(),
            station_id: station_id.into(),
            start_time,
            end_time,
            status: BookingStatus::Active,
            qr_token: qr_token.into(),
            total_amount,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            cancelled_at: None,
        }
    }

    /// Mark as confirmed (operator action)
    pub fn confirm(&mut self, now: DateTime<Utc>) {
        self.status = BookingStatus::Confirmed;
        self.confirmed_at = Some(now);
    }

    /// Mark as cancelled
    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(now);
    }

    /// Whether this booking still occupies slot capacity
    pub fn occupies_slot(&self) -> bool {
        matches!(self.status, BookingStatus::Active | BookingStatus::Confirmed)
    }

    /// Whether the booking may still be cancelled (status-wise)
    pub fn is_cancellable(&self) -> bool {
        self.occupies_slot()
    }

    /// Half-open interval overlap: a booking ending exactly when another
    /// starts does not count as overlapping.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        (self.start_time <= start && self.end_time > start)
            || (self.start_time < end && self.end_time >= end)
            || (self.start_time >= start && self.end_time <= end)
    }

    /// Whether `now` falls inside the lockout window before the slot start
    pub fn starts_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
        now + window > self.start_time
    }
}

// ── Tests ──────────────────────────────────────────────────────
