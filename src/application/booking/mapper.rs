//! Conversions between use-case types and the domain model

use crate::domain::booking::{Booking, TimeSlot};
use crate::domain::events::BookingCreatedEvent;
use crate::shared::errors::{DomainError, DomainResult};

use super::commands::{BookingResponse, ReserveCommand};

pub fn to_time_slot(command: &ReserveCommand) -> DomainResult<TimeSlot> {
    TimeSlot::from_parts(command.date, command.start_time, command.end_time)
}

/// Fails if `booking` has not been stored yet.
pub fn to_booking_response(booking: &Booking) -> DomainResult<BookingResponse> {
    let id = booking.id().ok_or_else(unsaved)?;
    let slot = booking.time_slot();
    Ok(BookingResponse {
        id,
        date: slot.date(),
        start_time: slot.start(),
        end_time: slot.end(),
    })
}

pub fn to_booking_created_event(booking: &Booking) -> DomainResult<BookingCreatedEvent> {
    let id = booking.id().ok_or_else(unsaved)?;
    let slot = booking.time_slot();
    Ok(BookingCreatedEvent {
        booking_id: id,
        date: slot.date(),
        start_time: slot.start(),
        end_time: slot.end(),
    })
}

fn unsaved() -> DomainError {
    DomainError::Storage("repository returned a booking without an id".to_string())
}
