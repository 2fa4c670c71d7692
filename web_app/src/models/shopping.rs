use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub id: i64,
    pub pet_id: i64,
    pub user_app_id: i64,
    pub description: String,
    pub purchased: bool,
    pub created_at: DateTime<Utc>,
}

impl super::Owned for ShoppingItem {
    fn owner_id(&self) -> i64 {
        self.user_app_id
    }
}
