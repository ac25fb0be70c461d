use crate::domain::booking::{Booking, TimeSlot};
use crate::shared::errors::{DomainError, DomainResult};

/// Rejects a slot that overlaps any existing booking.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlappingReservationsPolicy;

impl OverlappingReservationsPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Fails on the first booking in `existing` that overlaps `candidate`.
    pub fn validate(&self, candidate: &TimeSlot, existing: &[Booking]) -> DomainResult<()> {
        match existing
            .iter()
            .find(|booking| candidate.overlaps(booking.time_slot()))
        {
            Some(conflict) => Err(DomainError::BusinessRule(format!(
                "The requested time slot overlaps with an existing booking. \
                 Requested: [{}], Existing booking ID: {} [{}]",
                candidate,
                conflict
                    .id()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "unsaved".to_string()),
                conflict.time_slot()
            ))),
            None => Ok(()),
        }
    }
}
