pub mod auth;
pub mod errors;
pub mod event;
pub mod forms;
pub mod goal;
pub mod middleware;
pub mod pet;
pub mod routes;
pub mod server;
pub mod session;
pub mod shop;
pub mod shopping;
pub mod templates;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

use crate::repo;
use csrf::AesGcmCsrfProtection;

pub struct AppState {
    pub csrf_protec: AesGcmCsrfProtection,
    pub repo: repo::ImplAppRepo,
}
