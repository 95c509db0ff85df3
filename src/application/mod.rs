pub mod bookings;
pub mod notifications;
pub mod stations;

// Re-export key types for convenience
pub use bookings::{BookingService, CreateBookingRequest, UpdateBookingRequest};
pub use notifications::{
    start_notification_scheduler, NotificationEmitter, NotificationRequest, NotificationService,
    SchedulerConfig,
};
pub use stations::{CreateStationRequest, StationService, UpdateStationRequest};
