//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod notification_repository;
pub mod repository_provider;
pub mod station_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use notification_repository::SeaOrmNotificationRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use station_repository::SeaOrmStationRepository;
