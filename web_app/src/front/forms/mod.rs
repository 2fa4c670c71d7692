pub mod event;
pub mod goal;
pub mod pet;
pub mod shop;
pub mod shopping;
pub mod user;
