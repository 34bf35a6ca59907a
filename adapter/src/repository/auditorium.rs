use crate::database::{model::auditorium::AuditoriumRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{auditorium::Auditorium, id::AuditoriumId};
use kernel::repository::auditorium::AuditoriumRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct AuditoriumRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuditoriumRepository for AuditoriumRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Auditorium>> {
        let rows: Vec<AuditoriumRow> = sqlx::query_as(
            r#"
            SELECT auditorium_id, name
            FROM auditoriums
            ORDER BY name
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Auditorium::from).collect())
    }

    async fn find_by_id(&self, auditorium_id: AuditoriumId) -> AppResult<Option<Auditorium>> {
        let row: Option<AuditoriumRow> = sqlx::query_as(
            r#"
            SELECT auditorium_id, name
            FROM auditoriums
            WHERE auditorium_id = $1
            "#,
        )
        .bind(auditorium_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Auditorium::from))
    }
}
