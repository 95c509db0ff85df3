//! Notification services: construction, fire-and-forget dispatch and the
//! reminder/cleanup scheduler.

pub mod emitter;
pub mod scheduler;
pub mod service;

pub use emitter::{NotificationEmitter, NotificationRequest};
pub use scheduler::{start_notification_scheduler, SchedulerConfig};
pub use service::NotificationService;
