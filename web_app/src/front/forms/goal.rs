use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GoalForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
}

/// Progress is validated by the api, a text value lets `-5` or `abc` reach it
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProgressForm {
    #[serde(default)]
    pub progress: String,
}
