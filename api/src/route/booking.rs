use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::booking::{show_booking, show_my_bookings};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/me", get(show_my_bookings))
        .route("/:booking_id", get(show_booking));

    Router::new().nest("/bookings", booking_routers)
}
