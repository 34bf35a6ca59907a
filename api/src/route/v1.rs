use super::{auditorium::build_auditorium_routers, booking::build_booking_routers};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_auditorium_routers())
        .merge(build_booking_routers());
    Router::new().nest("/api/v1", router)
}
