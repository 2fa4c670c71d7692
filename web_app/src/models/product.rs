use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub image_url: Option<String>,
}

/// Outcome of trying to decrement the stock of a whole cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockCommit {
    Committed,
    /// Nothing was written, the product id had less stock than requested
    InsufficientStock(i64),
}
