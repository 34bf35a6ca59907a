use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::UserId, user::User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, role
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    #[sqlx::test(migrations = "../migrations")]
    async fn finds_registered_user_by_id(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let user_id = sqlx::query_scalar::<_, UserId>(
            r#"
            INSERT INTO users (user_name, email, password_hash)
            VALUES ('Test User', 'member@example.com', 'not-a-real-hash')
            RETURNING user_id
            "#,
        )
        .fetch_one(&pool)
        .await?;

        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo.find_current_user(user_id).await?.unwrap();
        assert_eq!(user.user_name, "Test User");
        assert_eq!(user.email, "member@example.com");
        assert_eq!(user.role, Role::User);

        let missing = repo.find_current_user(UserId::new(0)).await?;
        assert!(missing.is_none());

        Ok(())
    }
}
