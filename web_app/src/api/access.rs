//! Ownership guard applied before any handler logic touches a record.

use super::{ApiError, ApiResult};
use crate::{models, repo};

/// Returns the resource only when it exists and `user_id` owns it.
///
/// Missing and foreign records look the same to the caller, so nobody can
/// probe ids of other tutors.
pub fn assert_owns<T: models::Owned>(user_id: i64, resource: Option<T>) -> ApiResult<T> {
    match resource {
        Some(resource) if resource.owner_id() == user_id => Ok(resource),
        _ => Err(ApiError::NotFound),
    }
}

pub async fn owned_pet(
    user_id: i64,
    pet_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::pet::Pet> {
    assert_owns(user_id, repo.get_pet_by_id(pet_id).await?)
}

pub async fn owned_event(
    user_id: i64,
    event_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::event::Event> {
    assert_owns(user_id, repo.get_event_by_id(event_id).await?)
}

pub async fn owned_goal(
    user_id: i64,
    goal_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::goal::Goal> {
    assert_owns(user_id, repo.get_goal_by_id(goal_id).await?)
}

pub async fn owned_shopping_item(
    user_id: i64,
    item_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::shopping::ShoppingItem> {
    assert_owns(user_id, repo.get_shopping_item_by_id(item_id).await?)
}
