//! Booking DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::booking::{BookingResponse, ReserveCommand};

/// Request to reserve the court
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Booking date (YYYY-MM-DD)
    #[validate(required(message = "Date cannot be null"))]
    #[schema(value_type = String, format = Date, example = "2025-06-14")]
    pub date: Option<NaiveDate>,
    /// Start time (HH:MM:SS)
    #[validate(required(message = "Start time cannot be null"))]
    #[schema(value_type = String, example = "10:00:00")]
    pub start: Option<NaiveTime>,
    /// End time (HH:MM:SS), must be after start
    #[validate(required(message = "End time cannot be null"))]
    #[schema(value_type = String, example = "11:00:00")]
    pub end: Option<NaiveTime>,
}

impl From<CreateBookingRequest> for ReserveCommand {
    fn from(req: CreateBookingRequest) -> Self {
        ReserveCommand {
            date: req.date,
            start_time: req.start,
            end_time: req.end,
        }
    }
}

/// A confirmed booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i64,
    #[schema(value_type = String, format = Date, example = "2025-06-14")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "10:00:00")]
    pub start: NaiveTime,
    #[schema(value_type = String, example = "11:00:00")]
    pub end: NaiveTime,
}

impl From<BookingResponse> for BookingDto {
    fn from(b: BookingResponse) -> Self {
        Self {
            id: b.id,
            date: b.date,
            start: b.start_time,
            end: b.end_time,
        }
    }
}

/// Query for listing bookings
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingsQuery {
    /// Day to list (YYYY-MM-DD)
    #[param(value_type = String, example = "2025-06-14")]
    pub date: NaiveDate,
}
