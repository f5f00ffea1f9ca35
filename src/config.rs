//! Configuration management for credential-auth
//!
//! Loads the hashing cost and the stored users from `config.toml` with
//! environment overrides.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Default bcrypt cost factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Cost range accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Complete adapter configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Cost factor used when hashing new passwords
    /// Environment: CREDENTIAL_AUTH_BCRYPT_COST
    pub bcrypt_cost: u32,

    /// Users available to the in-memory lookup
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// A stored user: username and bcrypt hash, never a plaintext password
#[derive(Debug, Deserialize, Clone)]
pub struct UserEntry {
    pub username: String,
    pub password_hash: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            users: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from ./config.toml (optional) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("bcrypt_cost", i64::from(DEFAULT_BCRYPT_COST))?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("CREDENTIAL_AUTH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::from_settings(settings)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("bcrypt_cost", i64::from(DEFAULT_BCRYPT_COST))?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let config: AuthConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Message(format!(
                "bcrypt_cost must be between {} and {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST
            )));
        }

        for user in &self.users {
            if user.username.trim().is_empty() {
                return Err(ConfigError::Message("username cannot be empty".into()));
            }
            if user.password_hash.is_empty() {
                return Err(ConfigError::Message(format!(
                    "password_hash for user '{}' cannot be empty",
                    user.username
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let config = AuthConfig::from_toml("").unwrap();
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_users_parse() {
        let config = AuthConfig::from_toml(
            r#"
            bcrypt_cost = 4

            [[users]]
            username = "bob"
            password_hash = "$2b$04$abcdefghijklmnopqrstuu"
            "#,
        )
        .unwrap();
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].username, "bob");
    }

    #[test]
    fn test_cost_out_of_range_rejected() {
        assert!(AuthConfig::from_toml("bcrypt_cost = 3").is_err());
        assert!(AuthConfig::from_toml("bcrypt_cost = 32").is_err());
    }

    #[test]
    fn test_cost_bounds_match_bcrypt() {
        use crate::auth::hash_password;

        assert!(hash_password("password", MIN_BCRYPT_COST).is_ok());
        assert!(hash_password("password", MIN_BCRYPT_COST - 1).is_err());
        assert!(AuthConfig::from_toml(&format!("bcrypt_cost = {}", MAX_BCRYPT_COST)).is_ok());
    }

    // One test owns CREDENTIAL_AUTH_BCRYPT_COST so parallel tests never race on it.
    #[test]
    fn test_load_applies_environment_overrides() {
        const KEY: &str = "CREDENTIAL_AUTH_BCRYPT_COST";

        unsafe { std::env::set_var(KEY, "5") };
        let loaded = AuthConfig::load();

        unsafe { std::env::set_var(KEY, "3") };
        let too_low = AuthConfig::load();

        unsafe { std::env::set_var(KEY, "32") };
        let too_high = AuthConfig::load();

        unsafe { std::env::remove_var(KEY) };

        assert_eq!(loaded.unwrap().bcrypt_cost, 5);
        assert!(too_low.is_err());
        assert!(too_high.is_err());
    }

    #[test]
    fn test_empty_username_rejected() {
        let result = AuthConfig::from_toml(
            r#"
            [[users]]
            username = " "
            password_hash = "hash"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_hash_rejected() {
        let result = AuthConfig::from_toml(
            r#"
            [[users]]
            username = "bob"
            password_hash = ""
            "#,
        );
        assert!(result.is_err());
    }
}
