//! Event publisher adapters

mod bus_publisher;
mod logging_publisher;

pub use bus_publisher::EventBusPublisher;
pub use logging_publisher::LoggingEventPublisher;
