use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AddToCartForm {
    /// Blank means one unit
    #[serde(default)]
    pub quantity: String,
}
