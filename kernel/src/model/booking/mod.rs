use crate::model::id::{AuditoriumId, BookingId, UserId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

pub mod event;

/// Half-open time interval `[start, end)` within one calendar day.
///
/// The constructor is the only way to build one, so every value
/// satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::UnprocessableEntity(
                "end time must be later than start time".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// `[s1, e1)` and `[s2, e2)` share an instant iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Declined,
}

impl BookingStatus {
    /// Declined requests release their slot; pending and approved hold it.
    pub fn blocks(self) -> bool {
        !matches!(self, BookingStatus::Declined)
    }
}

/// A persisted booking, with its auditorium joined in for display.
#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub requested_by: UserId,
    pub booked_on: NaiveDate,
    pub slot: TimeSlot,
    pub purpose: String,
    pub status: BookingStatus,
    pub auditorium: BookingAuditorium,
}

#[derive(Debug)]
pub struct BookingAuditorium {
    pub auditorium_id: AuditoriumId,
    pub name: String,
}

/// The slice of a ledger row the conflict check reads.
#[derive(Debug)]
pub struct SlotOccupancy {
    pub booking_id: BookingId,
    pub slot: TimeSlot,
    pub status: BookingStatus,
}

/// Returns the first entry that blocks `candidate`, given the ledger rows
/// for a single auditorium and date. No side effects.
pub fn first_conflict<'a>(
    candidate: &TimeSlot,
    occupancies: &'a [SlotOccupancy],
) -> Option<&'a SlotOccupancy> {
    occupancies
        .iter()
        .filter(|o| o.status.blocks())
        .find(|o| o.slot.overlaps(candidate))
}
