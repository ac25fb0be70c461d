//! Publishes booking events onto the in-process event bus

use tracing::{debug, warn};

use crate::application::events::{Event, SharedEventBus};
use crate::domain::events::BookingCreatedEvent;
use crate::domain::ports::BookingEventPublisher;

pub struct EventBusPublisher {
    bus: SharedEventBus,
}

impl EventBusPublisher {
    pub fn new(bus: SharedEventBus) -> Self {
        Self { bus }
    }
}

impl BookingEventPublisher for EventBusPublisher {
    fn publish(&self, event: BookingCreatedEvent) {
        let booking_id = event.booking_id;
        match self.bus.publish(Event::BookingCreated(event)) {
            Ok(subscribers) => {
                debug!(booking_id, subscribers, "Booking event published");
            }
            Err(e) => {
                warn!(booking_id, "Booking event not delivered: {}", e);
            }
        }
    }
}
