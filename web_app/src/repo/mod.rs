pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

/// Storage of every record the app handles.
///
/// `get_*` lookups by id are not scoped to a tutor, callers pass the result
/// through [`crate::api::access::assert_owns`]. Mutations take the tutor id
/// and only touch rows that tutor owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    async fn get_user_app_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn insert_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<i64>;

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pet_by_id(&self, pet_id: i64) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64>;

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    async fn delete_pet(&self, pet_id: i64, user_id: i64) -> anyhow::Result<()>;

    async fn get_pet_events(&self, pet_id: i64) -> anyhow::Result<Vec<models::event::Event>>;

    async fn get_event_by_id(&self, event_id: i64)
    -> anyhow::Result<Option<models::event::Event>>;

    async fn insert_event(&self, event: &models::event::Event) -> anyhow::Result<i64>;

    async fn update_event(&self, event: &models::event::Event) -> anyhow::Result<()>;

    async fn set_event_as_completed(&self, event_id: i64, user_id: i64) -> anyhow::Result<()>;

    async fn delete_event(&self, event_id: i64, user_id: i64) -> anyhow::Result<()>;

    async fn get_pet_goals(&self, pet_id: i64) -> anyhow::Result<Vec<models::goal::Goal>>;

    async fn get_goal_by_id(&self, goal_id: i64) -> anyhow::Result<Option<models::goal::Goal>>;

    async fn insert_goal(&self, goal: &models::goal::Goal) -> anyhow::Result<i64>;

    async fn set_goal_progress(
        &self,
        goal_id: i64,
        user_id: i64,
        progress: u8,
    ) -> anyhow::Result<()>;

    async fn delete_goal(&self, goal_id: i64, user_id: i64) -> anyhow::Result<()>;

    async fn get_pet_shopping_items(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::shopping::ShoppingItem>>;

    async fn get_shopping_item_by_id(
        &self,
        item_id: i64,
    ) -> anyhow::Result<Option<models::shopping::ShoppingItem>>;

    async fn insert_shopping_item(
        &self,
        item: &models::shopping::ShoppingItem,
    ) -> anyhow::Result<i64>;

    async fn set_shopping_item_purchased(
        &self,
        item_id: i64,
        user_id: i64,
        purchased: bool,
    ) -> anyhow::Result<()>;

    async fn delete_shopping_item(&self, item_id: i64, user_id: i64) -> anyhow::Result<()>;

    async fn get_available_products(&self) -> anyhow::Result<Vec<models::product::Product>>;

    async fn get_product_by_id(
        &self,
        product_id: i64,
    ) -> anyhow::Result<Option<models::product::Product>>;

    async fn get_products_by_ids(
        &self,
        product_ids: &[i64],
    ) -> anyhow::Result<Vec<models::product::Product>>;

    /// Decrements the stock of every `(product_id, quantity)` line or none of them.
    async fn decrement_stock(
        &self,
        lines: &[(i64, u32)],
    ) -> anyhow::Result<models::product::StockCommit>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
