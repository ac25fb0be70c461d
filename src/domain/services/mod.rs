//! Domain services
//!
//! Business logic that spans more than one entity or policy.

pub mod booking;

pub use booking::BookingDomainService;
