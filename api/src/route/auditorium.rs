use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    auditorium::{show_auditorium, show_auditorium_list},
    booking::submit_booking,
};

pub fn build_auditorium_routers() -> Router<AppRegistry> {
    let auditorium_routers = Router::new()
        .route("/", get(show_auditorium_list))
        .route("/:auditorium_id", get(show_auditorium))
        .route("/:auditorium_id/bookings", post(submit_booking));

    Router::new().nest("/auditoriums", auditorium_routers)
}
