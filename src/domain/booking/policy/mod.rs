//! Admission policies applied to every reservation request.

mod opening_hours;
mod overlapping_reservations;

pub use opening_hours::OpeningHoursPolicy;
pub use overlapping_reservations::OverlappingReservationsPolicy;
