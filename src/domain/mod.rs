pub mod booking;
pub mod identity;
pub mod notification;
pub mod repositories;
pub mod station;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, BookingStatus};
pub use identity::Principal;
pub use notification::{
    Notification, NotificationKind, NotificationPriority, NotificationRepository,
    RELATED_ENTITY_BOOKING,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use station::{ChargingStation, StationRepository, StationStatus, StationType};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
