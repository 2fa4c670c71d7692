use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum EventKind {
    #[display("vacina")]
    #[serde(rename = "vacina")]
    Vaccine,
    #[display("consulta")]
    #[serde(rename = "consulta")]
    Consultation,
    #[display("medicamento")]
    #[serde(rename = "medicamento")]
    Medication,
    #[display("higiene")]
    #[serde(rename = "higiene")]
    Hygiene,
    #[default]
    #[display("outro")]
    #[serde(rename = "outro")]
    Other,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Vaccine,
        EventKind::Consultation,
        EventKind::Medication,
        EventKind::Hygiene,
        EventKind::Other,
    ];

    /// Human readable name shown in the forms
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Vaccine => "Vacina",
            EventKind::Consultation => "Consulta",
            EventKind::Medication => "Medicamento",
            EventKind::Hygiene => "Higiene",
            EventKind::Other => "Outro",
        }
    }
}

impl FromStr for EventKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = EventKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == value.trim())
        {
            return Ok(kind);
        }

        bail!("unknown event kind: {value}")
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,
    pub pet_id: i64,
    /// Owner of the pet, resolved through a join
    pub user_app_id: i64,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl super::Owned for Event {
    fn owner_id(&self) -> i64 {
        self.user_app_id
    }
}
