use chrono::{NaiveDate, NaiveTime};
use kernel::model::{
    booking::{Booking, BookingAuditorium, BookingStatus, SlotOccupancy, TimeSlot},
    id::{AuditoriumId, BookingId, UserId},
};
use shared::error::AppError;

// One ledger row with its auditorium joined in, as read back for
// history listings and single-record lookups.
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub auditorium_id: AuditoriumId,
    pub user_id: UserId,
    pub booked_on: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose: String,
    pub status: BookingStatus,
    pub auditorium_name: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            auditorium_id,
            user_id,
            booked_on,
            start_time,
            end_time,
            purpose,
            status,
            auditorium_name,
        } = value;
        // The table carries a CHECK (start_time < end_time); a row that
        // fails here is corrupt, not invalid input.
        let slot = TimeSlot::new(start_time, end_time).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "booking ({booking_id}) carries an inverted time slot"
            ))
        })?;
        Ok(Booking {
            booking_id,
            requested_by: user_id,
            booked_on,
            slot,
            purpose,
            status,
            auditorium: BookingAuditorium {
                auditorium_id,
                name: auditorium_name,
            },
        })
    }
}

// The per-day rows the conflict check runs over.
#[derive(sqlx::FromRow)]
pub struct SlotOccupancyRow {
    pub booking_id: BookingId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
}

impl TryFrom<SlotOccupancyRow> for SlotOccupancy {
    type Error = AppError;

    fn try_from(value: SlotOccupancyRow) -> Result<Self, Self::Error> {
        let SlotOccupancyRow {
            booking_id,
            start_time,
            end_time,
            status,
        } = value;
        let slot = TimeSlot::new(start_time, end_time).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "booking ({booking_id}) carries an inverted time slot"
            ))
        })?;
        Ok(SlotOccupancy {
            booking_id,
            slot,
            status,
        })
    }
}
