//! Booking aggregate
//!
//! Contains the time slot value object, the Booking entity, the admission
//! policies and the repository interface.

pub mod model;
pub mod policy;
pub mod repository;
pub mod time_slot;

pub use model::{Booking, BookingId};
pub use policy::{OpeningHoursPolicy, OverlappingReservationsPolicy};
pub use repository::BookingRepository;
pub use time_slot::TimeSlot;
