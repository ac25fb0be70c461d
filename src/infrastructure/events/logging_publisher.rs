//! Publisher that only writes events to the log

use tracing::info;

use crate::domain::events::BookingCreatedEvent;
use crate::domain::ports::BookingEventPublisher;

/// Used when no subscribers are wanted, e.g. for batch imports.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl BookingEventPublisher for LoggingEventPublisher {
    fn publish(&self, event: BookingCreatedEvent) {
        info!(
            booking_id = event.booking_id,
            date = %event.date,
            start_time = %event.start_time,
            end_time = %event.end_time,
            "Booking created event"
        );
    }
}
