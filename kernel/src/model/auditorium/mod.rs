use crate::model::id::AuditoriumId;

#[derive(Debug, PartialEq, Eq)]
pub struct Auditorium {
    pub auditorium_id: AuditoriumId,
    pub name: String,
}
