pub mod event;
pub mod goal;
pub mod pet;
pub mod product;
pub mod shopping;
pub mod user_app;

/// Rows that belong to a tutor, either directly or through one of their pets.
pub trait Owned {
    fn owner_id(&self) -> i64;
}
