//! # User API Module
//!
//! Registration and password authentication of tutors.

use super::{ApiError, ApiResult};
use crate::{consts, front, metric, models, repo};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

pub const MSG_REQUIRED_CREDENTIALS: &str = "Usuário e senha são obrigatórios.";
pub const MSG_SHORT_PASSWORD: &str = "A senha deve ter pelo menos 8 caracteres.";
pub const MSG_PASSWORDS_DIFFER: &str = "As senhas não conferem.";
pub const MSG_USERNAME_TAKEN: &str = "Este nome de usuário já está em uso.";
pub const MSG_INVALID_CREDENTIALS: &str = "Usuário ou senha inválidos.";

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password couldnt be hashed: {e}"))?
        .to_string())
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed_hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Creates a new tutor account.
///
/// # Errors
/// * [`ApiError::Validation`] for empty fields, a short password or a
///   confirmation that doesn't match
/// * [`ApiError::Conflict`] if the username already exists
pub async fn register(
    form: &front::forms::user::RegisterForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::user_app::User> {
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() {
        return Err(ApiError::Validation(MSG_REQUIRED_CREDENTIALS.into()));
    }
    if form.password.chars().count() < consts::MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(MSG_SHORT_PASSWORD.into()));
    }
    if form.password != form.password_confirmation {
        return Err(ApiError::Validation(MSG_PASSWORDS_DIFFER.into()));
    }

    if repo.get_user_app_by_username(username).await?.is_some() {
        return Err(ApiError::Conflict(MSG_USERNAME_TAKEN.into()));
    }

    let mut user = models::user_app::User::new(username, hash_password(&form.password)?);
    user.id = repo.insert_user_app(&user).await?;

    metric::incr_user_action_statds("create_user");
    Ok(user)
}

/// Checks the credentials of a login form.
///
/// Unknown usernames and wrong passwords give the same
/// [`ApiError::Validation`] message.
pub async fn authenticate(
    form: &front::forms::user::LoginForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::user_app::User> {
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() {
        return Err(ApiError::Validation(MSG_REQUIRED_CREDENTIALS.into()));
    }

    match repo.get_user_app_by_username(username).await? {
        Some(user) if verify_password(&form.password, &user.password_hash) => {
            metric::incr_user_action_statds("login");
            Ok(user)
        }
        _ => Err(ApiError::Validation(MSG_INVALID_CREDENTIALS.into())),
    }
}
