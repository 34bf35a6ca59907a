use crate::database::{
    model::booking::{BookingRow, SlotOccupancyRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{self, event::SubmitBooking, Booking, SlotOccupancy},
    id::{BookingId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

const EXCLUSION_VIOLATION: &str = "23P01";
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: SubmitBooking) -> AppResult<BookingId> {
        // Field checks run before the store is touched at all.
        let slot = event.validate()?;

        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        // Inside the transaction, two things must hold before the insert:
        // - the auditorium exists in the catalog
        // - no non-declined booking overlaps the requested slot
        // Any early return drops `tx`, which rolls the unit back.
        {
            let found = sqlx::query_scalar::<_, i32>(
                r#"
                SELECT auditorium_id
                FROM auditoriums
                WHERE auditorium_id = $1
                "#,
            )
            .bind(event.auditorium_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if found.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "auditorium ({}) was not found",
                    event.auditorium_id
                )));
            }

            let occupied = sqlx::query_as::<_, SlotOccupancyRow>(
                r#"
                SELECT booking_id, start_time, end_time, status
                FROM bookings
                WHERE auditorium_id = $1 AND booked_on = $2
                "#,
            )
            .bind(event.auditorium_id)
            .bind(event.booked_on)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(SlotOccupancy::try_from)
            .collect::<AppResult<Vec<_>>>()?;

            if let Some(taken) = booking::first_conflict(&slot, &occupied) {
                return Err(AppError::SlotUnavailable(format!(
                    "auditorium ({}) is already booked from {} to {} on {}",
                    event.auditorium_id,
                    taken.slot.start(),
                    taken.slot.end(),
                    event.booked_on,
                )));
            }
        }

        // New requests always enter the ledger as pending; approval is a
        // separate process.
        let booking_id = sqlx::query_scalar::<_, BookingId>(
            r#"
            INSERT INTO bookings
            (user_id, auditorium_id, booked_on, start_time, end_time, purpose, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING booking_id
            "#,
        )
        .bind(event.requested_by)
        .bind(event.auditorium_id)
        .bind(event.booked_on)
        .bind(slot.start())
        .bind(slot.end())
        .bind(&event.purpose)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_slot_race_error)?;

        tx.commit().await.map_err(map_slot_race_error)?;

        Ok(booking_id)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT
                b.booking_id,
                b.auditorium_id,
                b.user_id,
                b.booked_on,
                b.start_time,
                b.end_time,
                b.purpose,
                b.status,
                a.name AS auditorium_name
            FROM bookings AS b
            INNER JOIN auditoriums AS a ON b.auditorium_id = a.auditorium_id
            WHERE b.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_requester(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT
                b.booking_id,
                b.auditorium_id,
                b.user_id,
                b.booked_on,
                b.start_time,
                b.end_time,
                b.purpose,
                b.status,
                a.name AS auditorium_name
            FROM bookings AS b
            INNER JOIN auditoriums AS a ON b.auditorium_id = a.auditorium_id
            WHERE b.user_id = $1
            ORDER BY b.booked_on DESC, b.start_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Booking::try_from)
        .collect()
    }
}

impl BookingRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

// The store closes the race between the overlap check and the insert: a
// concurrent committer surfaces here as an exclusion violation or a
// serialization failure.
fn map_slot_race_error(e: sqlx::Error) -> AppError {
    let code = match &e {
        sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
        _ => None,
    };
    match code.as_deref() {
        Some(EXCLUSION_VIOLATION) => {
            AppError::SlotUnavailable("the requested slot has just been taken".into())
        }
        Some(SERIALIZATION_FAILURE) => AppError::TransactionError(e),
        _ => AppError::SpecificOperationError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use kernel::model::{booking::BookingStatus, id::AuditoriumId};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    async fn register_user(pool: &sqlx::PgPool, email: &str) -> UserId {
        sqlx::query_scalar::<_, UserId>(
            r#"
            INSERT INTO users (user_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id
            "#,
        )
        .bind("Test User")
        .bind(email)
        .bind("not-a-real-hash")
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn submission(
        user_id: UserId,
        auditorium_id: i32,
        booked_on: &str,
        start: &str,
        end: &str,
    ) -> SubmitBooking {
        SubmitBooking::new(
            AuditoriumId::new(auditorium_id),
            user_id,
            date(booked_on),
            time(start),
            time(end),
            "faculty rehearsal".into(),
            date("2025-06-01"),
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn submitted_booking_appears_in_requester_history(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        let booking_id = repo
            .create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;

        let booking = repo.find_by_id(booking_id).await?.unwrap();
        assert_eq!(booking.requested_by, user_id);
        assert_eq!(booking.booked_on, date("2025-06-01"));
        assert_eq!(booking.slot.start(), time("09:00:00"));
        assert_eq!(booking.slot.end(), time("10:00:00"));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.auditorium.name, "Auditorium BTI");

        let history = repo.find_by_requester(user_id).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].booking_id, booking_id);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn overlapping_submission_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        repo.create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;

        let err = repo
            .create(submission(user_id, 1, "2025-06-01", "09:30:00", "10:30:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlotUnavailable(_)));

        let history = repo.find_by_requester(user_id).await?;
        assert_eq!(history.len(), 1);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn back_to_back_submission_succeeds(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        repo.create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;
        // [10:00, 11:00) shares no instant with [09:00, 10:00)
        repo.create(submission(user_id, 1, "2025-06-01", "10:00:00", "11:00:00"))
            .await?;

        let history = repo.find_by_requester(user_id).await?;
        assert_eq!(history.len(), 2);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn declined_booking_does_not_block(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        let declined_id = repo
            .create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;
        sqlx::query("UPDATE bookings SET status = 'declined' WHERE booking_id = $1")
            .bind(declined_id)
            .execute(&pool)
            .await?;

        let booking_id = repo
            .create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;
        assert_ne!(booking_id, declined_id);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn other_auditorium_or_date_does_not_conflict(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        repo.create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;
        repo.create(submission(user_id, 2, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;
        repo.create(submission(user_id, 1, "2025-06-02", "09:00:00", "10:00:00"))
            .await?;

        let history = repo.find_by_requester(user_id).await?;
        assert_eq!(history.len(), 3);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn unknown_auditorium_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        let err = repo
            .create(submission(user_id, 999, "2025-06-01", "09:00:00", "10:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn field_validation_fails_before_reaching_the_store(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        let err = repo
            .create(submission(user_id, 1, "2025-06-01", "10:00:00", "09:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        let err = repo
            .create(submission(user_id, 1, "2025-05-31", "09:00:00", "10:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        let history = repo.find_by_requester(user_id).await?;
        assert!(history.is_empty());

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn history_is_ordered_newest_first(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        let early = repo
            .create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00"))
            .await?;
        let next_day = repo
            .create(submission(user_id, 1, "2025-06-02", "09:00:00", "10:00:00"))
            .await?;
        let late = repo
            .create(submission(user_id, 1, "2025-06-01", "11:00:00", "12:00:00"))
            .await?;

        let history = repo.find_by_requester(user_id).await?;
        let ids: Vec<_> = history.into_iter().map(|b| b.booking_id).collect();
        assert_eq!(ids, vec![next_day, late, early]);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn concurrent_overlapping_submissions_allow_exactly_one(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let first = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let second = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = register_user(&pool, "requester@example.com").await;

        let (a, b) = tokio::join!(
            first.create(submission(user_id, 1, "2025-06-01", "09:00:00", "10:00:00")),
            second.create(submission(user_id, 1, "2025-06-01", "09:30:00", "10:30:00")),
        );

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        if let Some(err) = [a, b].into_iter().find_map(Result::err) {
            assert!(matches!(
                err,
                AppError::SlotUnavailable(_)
                    | AppError::TransactionError(_)
                    | AppError::SpecificOperationError(_)
            ));
        }

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE auditorium_id = 1 AND booked_on = $1",
        )
        .bind(date("2025-06-01"))
        .fetch_one(&pool)
        .await?;
        assert_eq!(count, 1);

        Ok(())
    }
}
