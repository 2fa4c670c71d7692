//! Application configuration read from environment variables.
//!
//! Sensitive fields are marked and must never be logged.

use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app
    /// Values: "local", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value
    /// Example: "sqlite:data/pet_care.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data, only used in prod
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,

    /// Host address for web server binding
    /// Example: "0.0.0.0", "localhost"
    #[envconfig(default = "localhost")]
    pub web_server_host: String,

    /// Port for web server binding
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Path to SSL private key file
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: CSRF protection password (UUID format)
    pub csrf_pass: String,

    /// 🔒 SENSITIVE: CSRF protection salt (UUID format)
    pub csrf_salt: String,

    /// 🔒 SENSITIVE: Logfire write token, logs go to stdout without it
    pub logfire_token: Option<String>,

    /// Turns the product shop and the cart on or off
    #[envconfig(default = "true")]
    pub shop_enabled: bool,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.web_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.web_server_host,
            port = self.web_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn web_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.web_server_protocol(), self.url_host())
    }
}

/// Global application configuration instance
#[cfg(not(test))]
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});

/// Local configuration for tests, the environment is never read
#[cfg(test)]
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    let env = [
        ("DB_HOST", "sqlite::memory:"),
        ("CSRF_PASS", "9d4b5f0a-4a5e-4d1c-9d6a-0b9f3c1e2a11"),
        ("CSRF_SALT", "1f2e3d4c-5b6a-4978-8a6b-5c4d3e2f1a00"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect::<std::collections::HashMap<_, _>>();

    AppConfig::init_from_hashmap(&env).expect("test configuration is valid")
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(values: &[(&str, &str)]) -> AppConfig {
        let env = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        AppConfig::init_from_hashmap(&env).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[
            ("DB_HOST", "sqlite::memory:"),
            ("CSRF_PASS", "9d4b5f0a-4a5e-4d1c-9d6a-0b9f3c1e2a11"),
            ("CSRF_SALT", "1f2e3d4c-5b6a-4978-8a6b-5c4d3e2f1a00"),
        ]);

        assert!(!config.is_prod());
        assert!(config.shop_enabled);
        assert!(config.logfire_token.is_none());
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_prod_and_shop_switch() {
        let config = config_from(&[
            ("ENV", "PROD"),
            ("DB_HOST", "sqlite:data/pet_care.db"),
            ("WEB_SERVER_HOST", "pets.example.com"),
            ("CSRF_PASS", "9d4b5f0a-4a5e-4d1c-9d6a-0b9f3c1e2a11"),
            ("CSRF_SALT", "1f2e3d4c-5b6a-4978-8a6b-5c4d3e2f1a00"),
            ("SHOP_ENABLED", "false"),
        ]);

        assert!(config.is_prod());
        assert!(!config.shop_enabled);
        assert_eq!(config.base_url(), "https://pets.example.com");
    }
}
