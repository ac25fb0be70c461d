//! Application layer
//!
//! Use cases that coordinate the domain with its ports, plus the in-process
//! event bus.

pub mod booking;
pub mod events;

pub use booking::{
    BookingApplicationService, BookingResponse, BookingUseCase, DateLocks, ReserveCommand,
    SharedBookingUseCase,
};
pub use events::{create_event_bus, Event, EventBus, EventSubscriber, SharedEventBus};
