//! Booking use cases
//!
//! Turns raw reservation requests into stored bookings, coordinating the
//! domain service with the repository and event ports.

pub mod commands;
pub mod locks;
pub mod mapper;
pub mod ports;
pub mod service;

pub use commands::{BookingResponse, ReserveCommand};
pub use locks::DateLocks;
pub use ports::{BookingUseCase, SharedBookingUseCase};
pub use service::BookingApplicationService;
