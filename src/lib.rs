//! # Court Booking Service
//!
//! Reservation service for a single tennis court: bookings must fall inside
//! opening hours and may not overlap an existing booking on the same day.
//!
//! ## Architecture
//!
//! - **domain**: time slots, bookings, admission policies and ports
//! - **application**: booking use cases and the in-process event bus
//! - **infrastructure**: SQL and in-memory repositories, event publishers
//! - **interfaces**: REST API with Swagger documentation, WebSocket notifications
//! - **shared**: error types and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryBookingRepository, SeaOrmBookingRepository,
};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use application::events::{create_event_bus, Event, EventBus, SharedEventBus};
