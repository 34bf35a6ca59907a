use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::AuditoriumId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::auditorium::{AuditoriumResponse, AuditoriumsResponse},
};

pub async fn show_auditorium_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AuditoriumsResponse>> {
    registry
        .auditorium_repository()
        .find_all()
        .await
        .map(AuditoriumsResponse::from)
        .map(Json)
}

pub async fn show_auditorium(
    _user: AuthorizedUser,
    Path(auditorium_id): Path<AuditoriumId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AuditoriumResponse>> {
    registry
        .auditorium_repository()
        .find_by_id(auditorium_id)
        .await
        .and_then(|a| match a {
            Some(a) => Ok(Json(a.into())),
            None => Err(AppError::EntityNotFound("auditorium was not found".into())),
        })
}
