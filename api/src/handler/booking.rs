use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use garde::Validate;
use kernel::model::{
    booking::event::SubmitBooking,
    id::{AuditoriumId, BookingId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingResponse, BookingsResponse, CreateBookingRequest, CreateBookingResponse,
    },
};

pub async fn submit_booking(
    user: AuthorizedUser,
    Path(auditorium_id): Path<AuditoriumId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let event = SubmitBooking::new(
        auditorium_id,
        user.id(),
        req.booked_on,
        req.start_time,
        req.end_time,
        req.purpose,
        Local::now().date_naive(),
    );

    let booking_id = registry.booking_repository().create(event).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse { booking_id }),
    ))
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_by_requester(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_booking(
    _user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await
        .and_then(|b| match b {
            Some(b) => Ok(Json(b.into())),
            None => Err(AppError::EntityNotFound("booking was not found".into())),
        })
}
