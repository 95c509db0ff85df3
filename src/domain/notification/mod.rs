//! Notification aggregate

pub mod model;
pub mod repository;

pub use model::{
    Notification, NotificationKind, NotificationPriority, RELATED_ENTITY_BOOKING,
};
pub use repository::NotificationRepository;
