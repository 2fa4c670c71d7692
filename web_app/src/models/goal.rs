use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A goal is done once its progress reaches this value
pub const COMPLETED_PROGRESS: u8 = 100;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Goal {
    pub id: i64,
    pub pet_id: i64,
    pub user_app_id: i64,
    pub description: String,
    pub due_date: NaiveDate,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.progress >= COMPLETED_PROGRESS
    }
}

impl super::Owned for Goal {
    fn owner_id(&self) -> i64 {
        self.user_app_id
    }
}
