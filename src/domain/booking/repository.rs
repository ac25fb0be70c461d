//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingId};
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// All bookings on `date`, oldest first.
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Booking>>;

    /// Store a booking. Assigns an id when the booking has none, otherwise
    /// replaces the stored booking with that id.
    async fn save(&self, booking: Booking) -> DomainResult<Booking>;

    async fn find_by_id(&self, id: BookingId) -> DomainResult<Option<Booking>>;

    /// Remove a booking. Deleting an unknown id is not an error.
    async fn delete(&self, id: BookingId) -> DomainResult<()>;
}
