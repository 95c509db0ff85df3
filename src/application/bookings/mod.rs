//! Booking lifecycle engine

pub mod service;
pub mod validation;

pub use service::{BookingService, CreateBookingRequest, UpdateBookingRequest};
