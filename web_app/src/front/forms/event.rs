use crate::models;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct EventForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl From<&models::event::Event> for EventForm {
    fn from(event: &models::event::Event) -> Self {
        EventForm {
            kind: event.kind.to_string(),
            date: event.date.format(crate::api::DATE_INPUT_FORMAT).to_string(),
            notes: event.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SelectPetForm {
    #[serde(default)]
    pub pet_id: String,
}
