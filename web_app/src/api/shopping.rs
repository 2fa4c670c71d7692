//! # Shopping List API Module

use super::{ApiError, ApiResult, access, clean_field};
use crate::{front, metric, models, repo};
use chrono::Utc;
use serde::Serialize;

pub const MSG_REQUIRED_DESCRIPTION: &str = "Informe a descrição do item.";
pub const MSG_ITEM_ADDED: &str = "Item adicionado à lista de compras!";
pub const MSG_ITEM_PURCHASED: &str = "Item marcado como comprado!";
pub const MSG_ITEM_TO_BUY: &str = "Item movido de volta para a lista de compras.";
pub const MSG_ITEM_DELETED: &str = "Item removido da lista de compras.";

/// Shopping list of a pet split by purchase state
#[derive(Debug, Default, Serialize)]
pub struct ShoppingListSchema {
    /// Oldest first
    pub to_buy: Vec<models::shopping::ShoppingItem>,
    /// Newest first
    pub purchased: Vec<models::shopping::ShoppingItem>,
}

pub async fn get_pet_shopping_list(
    user_id: i64,
    pet_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<(models::pet::Pet, ShoppingListSchema)> {
    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    let (mut purchased, mut to_buy): (Vec<_>, Vec<_>) = repo
        .get_pet_shopping_items(pet.id)
        .await?
        .into_iter()
        .partition(|item| item.purchased);

    to_buy.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    purchased.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    Ok((pet, ShoppingListSchema { to_buy, purchased }))
}

pub async fn get_user_shopping_item(
    user_id: i64,
    item_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::shopping::ShoppingItem> {
    access::owned_shopping_item(user_id, item_id, repo).await
}

pub async fn add_shopping_item(
    user_id: i64,
    pet_id: i64,
    form: &front::forms::shopping::ShoppingItemForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::shopping::ShoppingItem> {
    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    let description = clean_field(&form.description);
    if description.is_empty() {
        return Err(ApiError::Validation(MSG_REQUIRED_DESCRIPTION.into()));
    }

    let mut item = models::shopping::ShoppingItem {
        id: 0,
        pet_id: pet.id,
        user_app_id: pet.user_app_id,
        description,
        purchased: false,
        created_at: Utc::now(),
    };
    item.id = repo.insert_shopping_item(&item).await?;

    metric::incr_shopping_action_statds("add_item");
    Ok(item)
}

/// Flips the purchased flag of an item, returns the item with its new state.
pub async fn toggle_purchased(
    user_id: i64,
    item_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::shopping::ShoppingItem> {
    let item = access::owned_shopping_item(user_id, item_id, repo).await?;
    let purchased = !item.purchased;

    repo.set_shopping_item_purchased(item.id, user_id, purchased)
        .await?;

    metric::incr_shopping_action_statds("toggle_item");
    Ok(models::shopping::ShoppingItem { purchased, ..item })
}

pub async fn delete_shopping_item(
    user_id: i64,
    item_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::shopping::ShoppingItem> {
    let item = access::owned_shopping_item(user_id, item_id, repo).await?;

    repo.delete_shopping_item(item.id, user_id).await?;

    metric::incr_shopping_action_statds("delete_item");
    Ok(item)
}
