//! Time slot value object

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::shared::errors::{DomainError, DomainResult};

/// A reservable interval on a single calendar day.
///
/// `end` is always strictly after `start`. The interval is half-open: a slot
/// ending at 11:00 and another starting at 11:00 do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidTimeSlot(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(Self { date, start, end })
    }

    /// Build a slot from fields that may be missing, as they arrive from
    /// the outside world.
    pub fn from_parts(
        date: Option<NaiveDate>,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> DomainResult<Self> {
        let date = date.ok_or_else(|| missing("Date"))?;
        let start = start.ok_or_else(|| missing("Start time"))?;
        let end = end.ok_or_else(|| missing("End time"))?;
        Self::new(date, start, end)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Two slots overlap when they share a date and their half-open
    /// intervals intersect.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        if self.date != other.date {
            return false;
        }
        self.start < other.end && other.start < self.end
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::InvalidTimeSlot(format!("{} cannot be null", field))
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.date, self.start, self.end)
    }
}

// ── Tests ──────────────────────────────────────────────────────
