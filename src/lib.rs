//! # Chargebook
//!
//! Booking lifecycle and slot availability engine for EV charging
//! stations: owners reserve charging slots, operators confirm or cancel
//! them, and a background scheduler handles reminders and notification
//! cleanup.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and caller identity
//! - **application**: Business logic: booking lifecycle, station guards,
//!   notification construction/dispatch and the reminder scheduler
//! - **infrastructure**: External concerns (SeaORM persistence, in-memory
//!   storage for development and tests)
//! - **shared**: Error taxonomy and graceful-shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export the core services
pub use application::{
    start_notification_scheduler, BookingService, NotificationEmitter, NotificationService,
    StationService,
};
