//! Notification domain entity

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    BookingConfirmation,
    BookingCancellation,
    BookingReminder,
    StationUpdate,
    SystemAlert,
    PaymentConfirmation,
    BookingExpired,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingConfirmation => "BookingConfirmation",
            Self::BookingCancellation => "BookingCancellation",
            Self::BookingReminder => "BookingReminder",
            Self::StationUpdate => "StationUpdate",
            Self::SystemAlert => "SystemAlert",
            Self::PaymentConfirmation => "PaymentConfirmation",
            Self::BookingExpired => "BookingExpired",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "BookingConfirmation" => Self::BookingConfirmation,
            "BookingCancellation" => Self::BookingCancellation,
            "BookingReminder" => Self::BookingReminder,
            "StationUpdate" => Self::StationUpdate,
            "PaymentConfirmation" => Self::PaymentConfirmation,
            "BookingExpired" => Self::BookingExpired,
            _ => Self::SystemAlert,
        }
    }
}

/// Notification priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
    Critical,
}

impl NotificationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Low" => Self::Low,
            "High" => Self::High,
            "Critical" => Self::Critical,
            _ => Self::Normal,
        }
    }
}

/// Entity-type tag for notifications raised by booking events
pub const RELATED_ENTITY_BOOKING: &str = "Booking";

/// User-facing notification record
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique notification ID (assigned by the store on create)
    pub id: String,
    pub recipient_nic: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Reference to the entity this notification is about
    pub related_entity_id: Option<String>,
    pub related_entity_type: Option<String>,
    pub is_read: bool,
    pub is_delivered: bool,
    pub priority: NotificationPriority,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    /// Past this instant the record is eligible for the cleanup sweep
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
}

impl Notification {
    pub fn new(
        recipient_nic: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: String::new(),
            recipient_nic: recipient_nic.into(),
            title: title.into(),
            message: message.into(),
            kind,
            related_entity_id: None,
            related_entity_type: None,
            is_read: false,
            is_delivered: false,
            priority: NotificationPriority::Normal,
            created_at: Utc::now(),
            read_at: None,
            delivered_at: None,
            expires_at: None,
            metadata: None,
        }
    }

    pub fn with_related_booking(mut self, booking_id: impl Into<String>) -> Self {
        self.related_entity_id = Some(booking_id.into());
        self.related_entity_type = Some(RELATED_ENTITY_BOOKING.to_string());
        self
    }

    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn builder_sets_related_booking_reference() {
        let n = Notification::new("NIC1", "Title", "Message", NotificationKind::BookingReminder)
            .with_related_booking("B001")
            .with_priority(NotificationPriority::High);

        assert_eq!(n.related_entity_id.as_deref(), Some("B001"));
        assert_eq!(n.related_entity_type.as_deref(), Some(RELATED_ENTITY_BOOKING));
        assert_eq!(n.priority, NotificationPriority::High);
        assert!(!n.is_read);
    }

    #[test]
    fn expiry_is_checked_against_now() {
        let now = Utc::now();
        let n = Notification::new("NIC1", "T", "M", NotificationKind::SystemAlert)
            .with_expiry(now - Duration::minutes(1));
        assert!(n.is_expired(now));

        let n = Notification::new("NIC1", "T", "M", NotificationKind::SystemAlert)
            .with_expiry(now + Duration::minutes(1));
        assert!(!n.is_expired(now));

        let n = Notification::new("NIC1", "T", "M", NotificationKind::SystemAlert);
        assert!(!n.is_expired(now));
    }

    #[test]
    fn kind_roundtrip() {
        for kind in &[
            NotificationKind::BookingConfirmation,
            NotificationKind::BookingCancellation,
            NotificationKind::BookingReminder,
            NotificationKind::StationUpdate,
            NotificationKind::SystemAlert,
            NotificationKind::PaymentConfirmation,
            NotificationKind::BookingExpired,
        ] {
            assert_eq!(&NotificationKind::from_str(kind.as_str()), kind);
        }
    }

    #[test]
    fn priority_roundtrip() {
        for priority in &[
            NotificationPriority::Low,
            NotificationPriority::Normal,
            NotificationPriority::High,
            NotificationPriority::Critical,
        ] {
            assert_eq!(&NotificationPriority::from_str(priority.as_str()), priority);
        }
    }
}
