use chrono::{NaiveDate, NaiveTime};
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingAuditorium, BookingStatus},
    id::{AuditoriumId, BookingId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub booked_on: NaiveDate,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
    #[garde(length(min = 1))]
    pub purpose: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_id: BookingId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub requested_by: UserId,
    pub booked_on: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose: String,
    pub status: BookingStatus,
    pub auditorium: BookingAuditoriumResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            requested_by,
            booked_on,
            slot,
            purpose,
            status,
            auditorium,
        } = value;
        Self {
            booking_id,
            requested_by,
            booked_on,
            start_time: slot.start(),
            end_time: slot.end(),
            purpose,
            status,
            auditorium: auditorium.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAuditoriumResponse {
    pub auditorium_id: AuditoriumId,
    pub name: String,
}

impl From<BookingAuditorium> for BookingAuditoriumResponse {
    fn from(value: BookingAuditorium) -> Self {
        let BookingAuditorium {
            auditorium_id,
            name,
        } = value;
        Self {
            auditorium_id,
            name,
        }
    }
}
