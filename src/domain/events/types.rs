//! Notification events
//!
//! Defines the events broadcast to subscribers once a fact about a booking
//! has been recorded.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingId;

/// Event types for notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    BookingCreated(BookingCreatedEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingCreated(_) => "booking_created",
        }
    }

    /// The calendar day the event concerns.
    pub fn date(&self) -> NaiveDate {
        match self {
            Event::BookingCreated(e) => e.date,
        }
    }
}

/// Emitted after a booking has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCreatedEvent {
    pub booking_id: BookingId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<BookingCreatedEvent> for Event {
    fn from(event: BookingCreatedEvent) -> Self {
        Event::BookingCreated(event)
    }
}

/// Event wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
