use crate::{api, consts, models};
use anyhow::anyhow;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Logged tutor stored (encrypt) in the identity cookie
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebAppSession {
    pub user_id: i64,
    pub username: String,
}

impl From<&models::user_app::User> for WebAppSession {
    fn from(user: &models::user_app::User) -> Self {
        WebAppSession {
            user_id: user.id,
            username: user.username.to_string(),
        }
    }
}

/// Key value storage that lives as long as the tutor session
pub trait SessionStore {
    fn get_value<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>>;

    fn set_value<T: Serialize>(&self, key: &str, value: T) -> anyhow::Result<()>;

    fn remove_value(&self, key: &str);
}

impl SessionStore for ntex_session::Session {
    fn get_value<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        self.get::<T>(key)
            .map_err(|e| anyhow!("session value {key} couldnt be read: {e}"))
    }

    fn set_value<T: Serialize>(&self, key: &str, value: T) -> anyhow::Result<()> {
        self.set(key, value)
            .map_err(|e| anyhow!("session value {key} couldnt be stored: {e}"))
    }

    fn remove_value(&self, key: &str) {
        self.remove(key)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Flash message shown once in the next rendered page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Queues a notice for the next page render.
///
/// A notice that can't be stored is only logged, the action that produced
/// it already happened.
pub fn push_notice(store: &impl SessionStore, level: NoticeLevel, text: impl Into<String>) {
    let mut notices = store
        .get_value::<Vec<Notice>>(consts::NOTICES_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();

    notices.push(Notice {
        level,
        text: text.into(),
    });

    if let Err(e) = store.set_value(consts::NOTICES_SESSION_KEY, notices) {
        log::error!("{e}");
    }
}

/// Drains the queued notices
pub fn take_notices(store: &impl SessionStore) -> Vec<Notice> {
    let notices = store
        .get_value::<Vec<Notice>>(consts::NOTICES_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();

    if !notices.is_empty() {
        store.remove_value(consts::NOTICES_SESSION_KEY);
    }

    notices
}

/// Cart of the session, an unreadable cart is dropped
pub fn load_cart(store: &impl SessionStore) -> api::shop::Cart {
    match store.get_value::<api::shop::Cart>(consts::CART_SESSION_KEY) {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            log::warn!("{e}");
            api::shop::Cart::default()
        }
    }
}

pub fn save_cart(store: &impl SessionStore, cart: &api::shop::Cart) -> anyhow::Result<()> {
    if cart.is_empty() {
        store.remove_value(consts::CART_SESSION_KEY);
        return Ok(());
    }

    store.set_value(consts::CART_SESSION_KEY, cart)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::{cell::RefCell, collections::HashMap};

    /// In memory [SessionStore] for tests
    #[derive(Default)]
    pub(crate) struct MemoryStore(RefCell<HashMap<String, String>>);

    impl SessionStore for MemoryStore {
        fn get_value<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
            match self.0.borrow().get(key) {
                Some(value) => Ok(Some(serde_json::from_str(value)?)),
                None => Ok(None),
            }
        }

        fn set_value<T: Serialize>(&self, key: &str, value: T) -> anyhow::Result<()> {
            self.0
                .borrow_mut()
                .insert(key.to_string(), serde_json::to_string(&value)?);
            Ok(())
        }

        fn remove_value(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    #[test]
    fn test_notices_are_read_once() {
        let store = MemoryStore::default();

        push_notice(&store, NoticeLevel::Success, "Evento concluído!");
        push_notice(&store, NoticeLevel::Warning, "Esse evento já foi concluído.");

        let notices = take_notices(&store);
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[1].text, "Esse evento já foi concluído.");
        assert!(take_notices(&store).is_empty());
    }

    #[test]
    fn test_cart_round_trip_through_session() {
        let store = MemoryStore::default();
        let mut cart = api::shop::Cart::default();
        cart.add(
            &models::product::Product {
                id: 3,
                price: dec!(25.00),
                stock: 10,
                ..Default::default()
            },
            2,
        )
        .unwrap();

        save_cart(&store, &cart).unwrap();
        assert_eq!(load_cart(&store), cart);

        cart.clear();
        save_cart(&store, &cart).unwrap();
        assert!(load_cart(&store).is_empty());
    }

    #[test]
    fn test_corrupt_cart_is_dropped() {
        let store = MemoryStore::default();
        store
            .0
            .borrow_mut()
            .insert(consts::CART_SESSION_KEY.into(), "not json".into());

        assert!(load_cart(&store).is_empty());
    }
}
