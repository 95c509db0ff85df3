//! Charging station domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Station connector technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationType {
    Ac,
    Dc,
}

impl StationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Dc => "DC",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "DC" => Self::Dc,
            _ => Self::Ac,
        }
    }
}

/// Station operating status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStatus {
    /// Open for bookings
    Active,
    /// Deactivated by backoffice
    Inactive,
    /// Temporarily out of service
    Maintenance,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            "Maintenance" => Self::Maintenance,
            _ => Self::Inactive,
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charging station with slot capacity accounting
///
/// `available_slots` is an advisory counter kept in `[0, total_slots]`;
/// the overlap count at booking time is the authoritative capacity check.
#[derive(Debug, Clone)]
pub struct ChargingStation {
    /// Unique station ID (assigned by the store on create)
    pub id: String,
    pub name: String,
    pub location: String,
    pub station_type: StationType,
    /// Units of concurrent charging capacity
    pub total_slots: i32,
    /// Advisory free-slot counter, decremented on create / incremented on cancel
    pub available_slots: i32,
    pub status: StationStatus,
    pub price_per_hour: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChargingStation {
    /// New station, all slots available
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        station_type: StationType,
        total_slots: i32,
        price_per_hour: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.into(),
            location: location.into(),
            station_type,
            total_slots,
            available_slots: total_slots,
            status: StationStatus::Active,
            price_per_hour,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == StationStatus::Active
    }
}

// ── Tests ──────────────────────────────────────────────────────
