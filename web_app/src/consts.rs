pub const CSRF_TOKEN_COOKIE_NAME: &str = "csrf_token";
pub const NOTICES_SESSION_KEY: &str = "notices";
pub const CART_SESSION_KEY: &str = "cart";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OVERVIEW_RECENT_EVENTS: usize = 5;

pub const MAX_AGE_COOKIES: i64 = chrono::TimeDelta::hours(4).num_seconds();
