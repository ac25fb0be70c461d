//! Booking application service

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::domain::booking::{Booking, BookingId, BookingRepository, TimeSlot};
use crate::domain::ports::BookingEventPublisher;
use crate::domain::services::BookingDomainService;
use crate::shared::errors::{DomainError, DomainResult};

use super::commands::{BookingResponse, ReserveCommand};
use super::locks::DateLocks;
use super::mapper;
use super::ports::BookingUseCase;

/// Runs the reservation flow against the configured adapters.
pub struct BookingApplicationService {
    repository: Arc<dyn BookingRepository>,
    publisher: Arc<dyn BookingEventPublisher>,
    domain_service: BookingDomainService,
    date_locks: DateLocks,
}

impl BookingApplicationService {
    pub fn new(
        repository: Arc<dyn BookingRepository>,
        publisher: Arc<dyn BookingEventPublisher>,
        domain_service: BookingDomainService,
    ) -> Self {
        Self {
            repository,
            publisher,
            domain_service,
            date_locks: DateLocks::new(),
        }
    }

    async fn admit(&self, slot: TimeSlot) -> DomainResult<Booking> {
        let _guard = self.date_locks.acquire(slot.date()).await;

        let existing = self.repository.find_by_date(slot.date()).await?;
        debug!(date = %slot.date(), existing = existing.len(), "Validating reservation");

        let candidate = self.domain_service.reserve(&slot, &existing)?;
        self.repository.save(candidate).await
    }

    fn record_rejection(&self, err: &DomainError) {
        metrics::counter!("bookings_rejected_total", "reason" => err.kind()).increment(1);
        if err.is_client_error() {
            info!(reason = err.kind(), "Reservation rejected: {}", err);
        } else {
            error!("Reservation failed: {}", err);
        }
    }
}

#[async_trait]
impl BookingUseCase for BookingApplicationService {
    async fn reserve(&self, command: ReserveCommand) -> DomainResult<BookingResponse> {
        let slot = match mapper::to_time_slot(&command) {
            Ok(slot) => slot,
            Err(e) => {
                self.record_rejection(&e);
                return Err(e);
            }
        };

        let admitted = self.admit(slot).await;
        self.date_locks.prune();

        let booking = match admitted {
            Ok(booking) => booking,
            Err(e) => {
                self.record_rejection(&e);
                return Err(e);
            }
        };

        let response = mapper::to_booking_response(&booking)?;
        self.publisher
            .publish(mapper::to_booking_created_event(&booking)?);

        metrics::counter!("bookings_reserved_total").increment(1);
        info!(booking_id = response.id, slot = %booking.time_slot(), "Booking created");

        Ok(response)
    }

    async fn find_booking(&self, id: BookingId) -> DomainResult<BookingResponse> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        mapper::to_booking_response(&booking)
    }

    async fn bookings_on(&self, date: NaiveDate) -> DomainResult<Vec<BookingResponse>> {
        self.repository
            .find_by_date(date)
            .await?
            .iter()
            .map(mapper::to_booking_response)
            .collect()
    }

    async fn cancel_booking(&self, id: BookingId) -> DomainResult<()> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let guard = self.date_locks.acquire(booking.time_slot().date()).await;
        let deleted = self.repository.delete(id).await;
        drop(guard);
        self.date_locks.prune();
        deleted?;

        metrics::counter!("bookings_cancelled_total").increment(1);
        info!(booking_id = id, "Booking cancelled");
        Ok(())
    }
}

fn not_found(id: BookingId) -> DomainError {
    DomainError::NotFound {
        entity: "Booking",
        field: "id",
        value: id.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{OpeningHoursPolicy, OverlappingReservationsPolicy};
    use crate::domain::events::BookingCreatedEvent;
    use crate::infrastructure::storage::InMemoryBookingRepository;
    use chrono::NaiveTime;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<BookingCreatedEvent>>,
    }

    impl RecordingPublisher {
        fn events(&self) -> Vec<BookingCreatedEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl BookingEventPublisher for RecordingPublisher {
        fn publish(&self, event: BookingCreatedEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct BrokenRepository;

    #[async_trait]
    impl BookingRepository for BrokenRepository {
        async fn find_by_date(&self, _date: NaiveDate) -> DomainResult<Vec<Booking>> {
            Err(DomainError::Storage("disk on fire".into()))
        }
        async fn save(&self, _booking: Booking) -> DomainResult<Booking> {
            Err(DomainError::Storage("disk on fire".into()))
        }
        async fn find_by_id(&self, _id: BookingId) -> DomainResult<Option<Booking>> {
            Err(DomainError::Storage("disk on fire".into()))
        }
        async fn delete(&self, _id: BookingId) -> DomainResult<()> {
            Err(DomainError::Storage("disk on fire".into()))
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn domain_service() -> BookingDomainService {
        BookingDomainService::new(
            OpeningHoursPolicy::new(at(8, 0), at(20, 0)).unwrap(),
            OverlappingReservationsPolicy::new(),
        )
    }

    fn service_with(
        repository: Arc<dyn BookingRepository>,
    ) -> (BookingApplicationService, Arc<RecordingPublisher>) {
        let publisher = Arc::new(RecordingPublisher::default());
        let service =
            BookingApplicationService::new(repository, publisher.clone(), domain_service());
        (service, publisher)
    }

    fn service() -> (BookingApplicationService, Arc<RecordingPublisher>) {
        service_with(Arc::new(InMemoryBookingRepository::new()))
    }

    #[tokio::test]
    async fn reserve_stores_and_publishes() {
        let (service, publisher) = service();

        let response = service
            .reserve(ReserveCommand::new(date(), at(10, 0), at(11, 0)))
            .await
            .unwrap();

        assert_eq!(response.id, 1);
        assert_eq!(response.date, date());
        assert_eq!(response.start_time, at(10, 0));
        assert_eq!(response.end_time, at(11, 0));

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].booking_id, 1);
        assert_eq!(events[0].start_time, at(10, 0));
    }

    #[tokio::test]
    async fn overlapping_reservation_is_rejected_without_event() {
        let (service, publisher) = service();
        service
            .reserve(ReserveCommand::new(date(), at(10, 0), at(11, 0)))
            .await
            .unwrap();

        let err = service
            .reserve(ReserveCommand::new(date(), at(10, 30), at(11, 30)))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert!(err.to_string().contains("Existing booking ID: 1"));
        assert_eq!(publisher.events().len(), 1);
    }

    #[tokio::test]
    async fn adjacent_reservations_are_accepted() {
        let (service, _) = service();
        for (start, end) in [(10, 11), (11, 12), (9, 10)] {
            service
                .reserve(ReserveCommand::new(date(), at(start, 0), at(end, 0)))
                .await
                .unwrap();
        }
        assert_eq!(service.bookings_on(date()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_field_is_rejected_before_storage() {
        let (service, _) = service_with(Arc::new(BrokenRepository));
        let command = ReserveCommand {
            date: Some(date()),
            start_time: None,
            end_time: Some(at(11, 0)),
        };

        let err = service.reserve(command).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTimeSlot("Start time cannot be null".into())
        );
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let (service, publisher) = service_with(Arc::new(BrokenRepository));
        let err = service
            .reserve(ReserveCommand::new(date(), at(10, 0), at(11, 0)))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(!err.is_client_error());
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn find_and_cancel() {
        let (service, _) = service();
        let created = service
            .reserve(ReserveCommand::new(date(), at(15, 0), at(16, 0)))
            .await
            .unwrap();

        assert_eq!(service.find_booking(created.id).await.unwrap(), created);

        service.cancel_booking(created.id).await.unwrap();
        assert!(matches!(
            service.find_booking(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.cancel_booking(created.id).await,
            Err(DomainError::NotFound { .. })
        ));

        // The freed slot can be booked again.
        service
            .reserve(ReserveCommand::new(date(), at(15, 0), at(16, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn bookings_on_filters_by_date() {
        let (service, _) = service();
        let next_day = date().succ_opt().unwrap();
        service
            .reserve(ReserveCommand::new(date(), at(10, 0), at(11, 0)))
            .await
            .unwrap();
        service
            .reserve(ReserveCommand::new(next_day, at(10, 0), at(11, 0)))
            .await
            .unwrap();

        let on_next = service.bookings_on(next_day).await.unwrap();
        assert_eq!(on_next.len(), 1);
        assert_eq!(on_next[0].date, next_day);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_same_slot_reservations_yield_one_booking() {
        let repository = Arc::new(InMemoryBookingRepository::new());
        let (service, publisher) = service_with(repository.clone());
        let service = Arc::new(service);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                // Every request overlaps 10:00-11:00.
                let start = at(10, (i % 4) * 10);
                tokio::spawn(async move {
                    service
                        .reserve(ReserveCommand::new(date(), start, at(11, 0)))
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(repository.len(), 1);
        assert_eq!(publisher.events().len(), 1);
        assert!(service.date_locks.is_empty());
    }
}
