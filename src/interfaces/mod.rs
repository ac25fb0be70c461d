//! Interface adapters
//!
//! - `http`: REST API with Swagger documentation
//! - `ws`: real-time booking notifications

pub mod http;
pub mod ws;
