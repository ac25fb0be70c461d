//! Booking domain entity

use std::fmt;
use std::hash::{Hash, Hasher};

use super::time_slot::TimeSlot;

/// Identity assigned to a booking by the persistence layer.
pub type BookingId = i64;

/// A reservation of the court for one time slot.
///
/// A booking without an id is a candidate that has passed validation but
/// has not been stored yet. Once stored, the id alone decides identity.
#[derive(Debug, Clone)]
pub struct Booking {
    id: Option<BookingId>,
    time_slot: TimeSlot,
}

impl Booking {
    pub fn new(id: Option<BookingId>, time_slot: TimeSlot) -> Self {
        Self { id, time_slot }
    }

    /// An unsaved booking for `time_slot`.
    pub fn candidate(time_slot: TimeSlot) -> Self {
        Self::new(None, time_slot)
    }

    pub fn id(&self) -> Option<BookingId> {
        self.id
    }

    pub fn time_slot(&self) -> &TimeSlot {
        &self.time_slot
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Same slot, with the identity handed out by a repository.
    pub fn with_id(self, id: BookingId) -> Self {
        Self {
            id: Some(id),
            time_slot: self.time_slot,
        }
    }
}

// Saved bookings compare by id. Unsaved candidates have nothing but their
// slot, so they compare by slot and never equal a saved booking.
impl PartialEq for Booking {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.time_slot == other.time_slot,
            _ => false,
        }
    }
}

impl Eq for Booking {}

impl Hash for Booking {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.id {
            Some(id) => {
                0u8.hash(state);
                id.hash(state);
            }
            None => {
                1u8.hash(state);
                self.time_slot.hash(state);
            }
        }
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Booking(id={}, {})", id, self.time_slot),
            None => write!(f, "Booking(unsaved, {})", self.time_slot),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
