//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use log::debug;

use crate::domain::booking::{Booking, BookingId, BookingRepository};
use crate::domain::{DomainError, DomainResult};

/// In-memory booking storage for development and testing
pub struct InMemoryBookingRepository {
    bookings: DashMap<BookingId, Booking>,
    id_counter: AtomicI64,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    /// Drop every booking and restart ids at 1.
    pub fn clear(&self) {
        self.bookings.clear();
        self.id_counter.store(1, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| entry.time_slot().date() == date)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|b| b.id());
        Ok(found)
    }

    async fn save(&self, booking: Booking) -> DomainResult<Booking> {
        let id = match booking.id() {
            Some(id) => {
                // Keep the counter ahead of explicitly chosen ids.
                self.id_counter
                    .fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => self
                .id_counter
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
                .map_err(|_| DomainError::Storage("booking id space exhausted".to_string()))?,
        };

        let booking = booking.with_id(id);
        debug!("Storing booking {} ({})", id, booking.time_slot());
        self.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: BookingId) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.value().clone()))
    }

    async fn delete(&self, id: BookingId) -> DomainResult<()> {
        self.bookings.remove(&id);
        Ok(())
    }
}
