use chrono::NaiveTime;

use crate::domain::booking::TimeSlot;
use crate::shared::errors::{DomainError, DomainResult};

/// Bookings must start no earlier than opening time and end no later than
/// closing time. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHoursPolicy {
    opening_time: NaiveTime,
    closing_time: NaiveTime,
}

impl OpeningHoursPolicy {
    pub fn new(opening_time: NaiveTime, closing_time: NaiveTime) -> DomainResult<Self> {
        if closing_time <= opening_time {
            return Err(DomainError::InvalidArgument(
                "Closing time must be after opening time".to_string(),
            ));
        }
        Ok(Self {
            opening_time,
            closing_time,
        })
    }

    pub fn from_parts(
        opening_time: Option<NaiveTime>,
        closing_time: Option<NaiveTime>,
    ) -> DomainResult<Self> {
        let opening_time = opening_time.ok_or_else(|| {
            DomainError::InvalidArgument("Opening time cannot be null".to_string())
        })?;
        let closing_time = closing_time.ok_or_else(|| {
            DomainError::InvalidArgument("Closing time cannot be null".to_string())
        })?;
        Self::new(opening_time, closing_time)
    }

    pub fn opening_time(&self) -> NaiveTime {
        self.opening_time
    }

    pub fn closing_time(&self) -> NaiveTime {
        self.closing_time
    }

    pub fn validate(&self, slot: &TimeSlot) -> DomainResult<()> {
        if slot.start() < self.opening_time {
            return Err(DomainError::BusinessRule(format!(
                "Booking cannot start before opening time. Start: {}, Opening time: {}",
                slot.start(),
                self.opening_time
            )));
        }

        if slot.end() > self.closing_time {
            return Err(DomainError::BusinessRule(format!(
                "Booking cannot end after closing time. End: {}, Closing time: {}",
                slot.end(),
                self.closing_time
            )));
        }

        Ok(())
    }
}
