use crate::model::{
    booking::{event::SubmitBooking, Booking},
    id::{BookingId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // Validates the request, then checks the slot and inserts the booking
    // as one atomic unit.
    async fn create(&self, event: SubmitBooking) -> AppResult<BookingId>;
    // Fetches a single booking with its auditorium joined in.
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // Booking history of one requester, newest first.
    async fn find_by_requester(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
}
