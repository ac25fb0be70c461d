//! In-process storage adapters

mod memory;

pub use memory::InMemoryBookingRepository;
