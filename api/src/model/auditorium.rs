use kernel::model::{auditorium::Auditorium, id::AuditoriumId};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditoriumsResponse {
    pub items: Vec<AuditoriumResponse>,
}

impl From<Vec<Auditorium>> for AuditoriumsResponse {
    fn from(value: Vec<Auditorium>) -> Self {
        Self {
            items: value.into_iter().map(AuditoriumResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditoriumResponse {
    pub auditorium_id: AuditoriumId,
    pub name: String,
}

impl From<Auditorium> for AuditoriumResponse {
    fn from(value: Auditorium) -> Self {
        let Auditorium {
            auditorium_id,
            name,
        } = value;
        Self {
            auditorium_id,
            name,
        }
    }
}
