//! SeaORM entities

pub mod booking;
