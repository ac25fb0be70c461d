//! Inbound port for the booking use cases

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::BookingId;
use crate::shared::errors::DomainResult;

use super::commands::{BookingResponse, ReserveCommand};

#[async_trait]
pub trait BookingUseCase: Send + Sync {
    /// Validate and store a new booking, then announce it.
    async fn reserve(&self, command: ReserveCommand) -> DomainResult<BookingResponse>;

    async fn find_booking(&self, id: BookingId) -> DomainResult<BookingResponse>;

    async fn bookings_on(&self, date: NaiveDate) -> DomainResult<Vec<BookingResponse>>;

    async fn cancel_booking(&self, id: BookingId) -> DomainResult<()>;
}

pub type SharedBookingUseCase = Arc<dyn BookingUseCase>;
