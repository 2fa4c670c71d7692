use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}
