//! Use-case inputs and outputs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingId;

/// Request to reserve the court. Fields may be missing when they come from
/// an untrusted caller; validation happens when the slot is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReserveCommand {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl ReserveCommand {
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            date: Some(date),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }
}

/// A stored booking as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
