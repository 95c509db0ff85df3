//! Station management

pub mod service;

pub use service::{CreateStationRequest, StationService, UpdateStationRequest};
