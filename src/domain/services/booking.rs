//! Reservation admission

use crate::domain::booking::{Booking, OpeningHoursPolicy, OverlappingReservationsPolicy, TimeSlot};
use crate::shared::errors::DomainResult;

/// Decides whether a requested slot can become a booking.
///
/// Holds no state besides its policies and performs no I/O, so one instance
/// is shared across all requests.
#[derive(Debug, Clone)]
pub struct BookingDomainService {
    opening_hours: OpeningHoursPolicy,
    overlapping: OverlappingReservationsPolicy,
}

impl BookingDomainService {
    pub fn new(
        opening_hours: OpeningHoursPolicy,
        overlapping: OverlappingReservationsPolicy,
    ) -> Self {
        Self {
            opening_hours,
            overlapping,
        }
    }

    /// Validate `slot` against opening hours, then against the bookings
    /// already held on the same date. Returns an unsaved booking.
    pub fn reserve(&self, slot: &TimeSlot, existing: &[Booking]) -> DomainResult<Booking> {
        self.opening_hours.validate(slot)?;
        self.overlapping.validate(slot, existing)?;
        Ok(Booking::candidate(*slot))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::DomainError;
    use chrono::{NaiveDate, NaiveTime};

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn slot(start: (u32, u32), end: (u32, u32)) -> TimeSlot {
        TimeSlot::new(date(), at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    fn service() -> BookingDomainService {
        BookingDomainService::new(
            OpeningHoursPolicy::new(at(8, 0), at(20, 0)).unwrap(),
            OverlappingReservationsPolicy::new(),
        )
    }

    #[test]
    fn reserves_free_slot_inside_hours() {
        let requested = slot((10, 0), (11, 0));
        let booking = service().reserve(&requested, &[]).unwrap();

        assert_eq!(booking.id(), None);
        assert_eq!(booking.time_slot(), &requested);
    }

    #[test]
    fn rejects_outside_hours_even_without_bookings() {
        let err = service().reserve(&slot((7, 0), (9, 0)), &[]).unwrap_err();
        assert!(err.to_string().contains("before opening time"));

        let err = service().reserve(&slot((19, 0), (21, 0)), &[]).unwrap_err();
        assert!(err.to_string().contains("after closing time"));
    }

    #[test]
    fn opening_hours_are_checked_before_overlap() {
        let existing = vec![Booking::new(Some(1), slot((7, 0), (9, 0)))];
        let err = service()
            .reserve(&slot((7, 30), (8, 30)), &existing)
            .unwrap_err();
        assert!(err.to_string().contains("before opening time"));
    }

    #[test]
    fn cites_first_conflicting_booking() {
        let existing = vec![
            Booking::new(Some(4), slot((9, 0), (10, 0))),
            Booking::new(Some(2), slot((10, 0), (11, 0))),
            Booking::new(Some(9), slot((10, 30), (12, 0))),
        ];
        let err = service()
            .reserve(&slot((10, 30), (11, 30)), &existing)
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert!(err.to_string().contains("Existing booking ID: 2"));
    }

    #[test]
    fn worked_example() {
        let svc = service();
        let existing = vec![Booking::new(Some(1), slot((10, 0), (11, 0)))];

        assert!(svc.reserve(&slot((10, 30), (11, 30)), &existing).is_err());
        assert!(svc.reserve(&slot((11, 0), (12, 0)), &existing).is_ok());
        assert!(svc.reserve(&slot((7, 0), (8, 0)), &existing).is_err());
        assert!(svc.reserve(&slot((19, 0), (20, 0)), &existing).is_ok());
    }

    #[test]
    fn rebuilt_slot_matches_reserved_one() {
        let booking = service().reserve(&slot((14, 15), (15, 45)), &[]).unwrap();
        let s = booking.time_slot();
        let rebuilt = TimeSlot::new(s.date(), s.start(), s.end()).unwrap();
        assert_eq!(&rebuilt, s);
    }
}
