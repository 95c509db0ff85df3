//! Database entities module

pub mod booking;
pub mod notification;
pub mod station;
