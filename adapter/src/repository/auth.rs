use crate::{
    database::{
        model::auth::{AuthorizationKey, AuthorizedUserId, UserItem},
        ConnectionPool,
    },
    redis::RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|opt| opt.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        // Lookup is always bound, never interpolated.
        let user_item = sqlx::query_as::<_, UserItem>(
            r#"
            SELECT user_id, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or(AppError::UnauthenticatedError)?;

        let valid = bcrypt::verify(password, &user_item.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }
        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let key = AuthorizationKey::from(uuid::Uuid::new_v4().simple().to_string());
        let value = AuthorizedUserId::new(event.user_id);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = (&access_token).into();
        self.kv.delete(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::config::RedisConfig;

    fn repo(pool: sqlx::PgPool) -> AuthRepositoryImpl {
        // Client construction does not dial out; these tests stay on Postgres.
        let kv = Arc::new(
            RedisClient::new(&RedisConfig {
                host: "localhost".into(),
                port: 6379,
            })
            .unwrap(),
        );
        AuthRepositoryImpl::new(ConnectionPool::new(pool), kv, 60)
    }

    async fn register_user(pool: &sqlx::PgPool, email: &str, password: &str) -> UserId {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).unwrap();
        sqlx::query_scalar::<_, UserId>(
            r#"
            INSERT INTO users (user_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id
            "#,
        )
        .bind("Test User")
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn verify_user_accepts_correct_credentials(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let user_id = register_user(&pool, "member@example.com", "opensesame").await;
        let repo = repo(pool);

        let verified = repo.verify_user("member@example.com", "opensesame").await?;
        assert_eq!(verified, user_id);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn verify_user_rejects_wrong_password_and_unknown_email(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        register_user(&pool, "member@example.com", "opensesame").await;
        let repo = repo(pool);

        let err = repo
            .verify_user("member@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnauthenticatedError));

        let err = repo
            .verify_user("stranger@example.com", "opensesame")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnauthenticatedError));

        Ok(())
    }
}
