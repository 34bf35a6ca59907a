use kernel::model::{auditorium::Auditorium, id::AuditoriumId};

#[derive(sqlx::FromRow)]
pub struct AuditoriumRow {
    pub auditorium_id: AuditoriumId,
    pub name: String,
}

impl From<AuditoriumRow> for Auditorium {
    fn from(value: AuditoriumRow) -> Self {
        let AuditoriumRow {
            auditorium_id,
            name,
        } = value;
        Auditorium {
            auditorium_id,
            name,
        }
    }
}
