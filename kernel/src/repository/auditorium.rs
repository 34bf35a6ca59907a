use crate::model::{auditorium::Auditorium, id::AuditoriumId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuditoriumRepository: Send + Sync {
    // The whole catalog, ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Auditorium>>;
    async fn find_by_id(&self, auditorium_id: AuditoriumId) -> AppResult<Option<Auditorium>>;
}
