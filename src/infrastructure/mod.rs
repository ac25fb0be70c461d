//! Infrastructure layer - external concerns

pub mod database;
pub mod events;
pub mod storage;

pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmBookingRepository};
pub use events::{EventBusPublisher, LoggingEventPublisher};
pub use storage::InMemoryBookingRepository;
