use super::TimeSlot;
use crate::model::id::{AuditoriumId, UserId};
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use shared::error::{AppError, AppResult};

#[derive(Debug, new)]
pub struct SubmitBooking {
    pub auditorium_id: AuditoriumId,
    pub requested_by: UserId,
    pub booked_on: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose: String,
    /// Calendar date at the submission site; bookings may not be dated
    /// before it.
    pub submitted_on: NaiveDate,
}

impl SubmitBooking {
    /// Field checks that need no catalog access. Runs before any query is
    /// issued; each failure carries its own message.
    pub fn validate(&self) -> AppResult<TimeSlot> {
        if self.auditorium_id.raw() <= 0 {
            return Err(AppError::UnprocessableEntity(
                "auditorium id must be a positive identifier".into(),
            ));
        }
        if self.booked_on < self.submitted_on {
            return Err(AppError::UnprocessableEntity(
                "booking date must not be earlier than today".into(),
            ));
        }
        TimeSlot::new(self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(auditorium_id: i32, booked_on: &str, start: &str, end: &str) -> SubmitBooking {
        SubmitBooking::new(
            AuditoriumId::new(auditorium_id),
            UserId::new(1),
            booked_on.parse().unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
            "rehearsal".into(),
            "2025-06-01".parse().unwrap(),
        )
    }

    #[test]
    fn accepts_well_formed_request() {
        assert!(event(1, "2025-06-01", "09:00:00", "10:00:00")
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_non_positive_auditorium_id() {
        let err = event(0, "2025-06-01", "09:00:00", "10:00:00")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("positive identifier"));
    }

    #[test]
    fn rejects_past_date() {
        let err = event(1, "2025-05-31", "09:00:00", "10:00:00")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("earlier than today"));
    }

    #[test]
    fn rejects_inverted_times() {
        let err = event(1, "2025-06-01", "10:00:00", "09:00:00")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("later than start time"));
    }

    #[test]
    fn id_check_comes_before_date_check() {
        // both fields invalid: the identifier failure surfaces first
        let err = event(-3, "2025-05-31", "09:00:00", "10:00:00")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("positive identifier"));
    }
}
