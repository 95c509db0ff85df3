//! Charging station aggregate

pub mod model;
pub mod repository;

pub use model::{ChargingStation, StationStatus, StationType};
pub use repository::StationRepository;
