//! WebSocket interfaces
//!
//! - `notifications`: Real-time booking event streaming to UI clients

pub mod notifications;

pub use notifications::{ws_notifications_handler, EventFilter, NotificationState};
