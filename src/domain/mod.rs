//! Domain layer
//!
//! Pure booking rules. Nothing here touches storage or the network.

pub mod booking;
pub mod events;
pub mod ports;
pub mod services;

pub use booking::{
    Booking, BookingId, BookingRepository, OpeningHoursPolicy, OverlappingReservationsPolicy,
    TimeSlot,
};
pub use events::{BookingCreatedEvent, Event, EventMessage};
pub use ports::BookingEventPublisher;
pub use services::BookingDomainService;

pub use crate::shared::errors::{DomainError, DomainResult};
