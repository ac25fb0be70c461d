//! Domain ports (hexagonal architecture boundaries)
//!
//! Outbound contracts the booking core relies on besides the repository.

use crate::domain::events::BookingCreatedEvent;

/// Announces confirmed bookings to the outside world.
///
/// Publishing is fire-and-forget: implementations handle and log their own
/// delivery failures, the caller never sees them.
pub trait BookingEventPublisher: Send + Sync {
    fn publish(&self, event: BookingCreatedEvent);
}
