use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ShoppingItemForm {
    #[serde(default)]
    pub description: String,
}
