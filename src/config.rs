//! Configuration module
//!
//! The service reads one TOML file. Every section and field is optional;
//! anything left out takes the default below.
//!
//! ```toml
//! [database]
//! url = "sqlite://./car_rental.db?mode=rwc"
//! max_connections = 5
//!
//! [logging]
//! level = "info"
//! format = "plain"   # or "json"
//!
//! [security]
//! bcrypt_cost = 12
//!
//! [seed]
//! enabled = true
//!
//! [[seed.users]]
//! first_name = "Ada"
//! last_name = "Admin"
//! email = "ada@example.com"
//! password = "secret"
//! city = "Wrocław"
//! street = "Warszawska"
//! house_number = "1"
//! postal_code = "71-000"
//! roles = ["ADMIN", "USER"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{RegisterUser, RoleName};
use crate::infrastructure::DatabaseConfig;

/// Environment variable holding the config file path
pub const CONFIG_ENV: &str = "CAR_RENTAL_CONFIG";

/// `<config dir>/car-rental/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("car-rental").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `carrental=debug,sea_orm=warn`
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Accounts created at startup when missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    pub users: Vec<SeedUser>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            users: vec![
                SeedUser {
                    first_name: "Michał".to_string(),
                    last_name: "Admin".to_string(),
                    email: "admin@car-rental.local".to_string(),
                    password: "proba".to_string(),
                    city: "Wrocław".to_string(),
                    street: "Warszawska".to_string(),
                    house_number: "34".to_string(),
                    postal_code: "71-000".to_string(),
                    roles: vec![RoleName::Admin, RoleName::User],
                },
                SeedUser {
                    first_name: "Andrzej".to_string(),
                    last_name: "User".to_string(),
                    email: "user@car-rental.local".to_string(),
                    password: "proba".to_string(),
                    city: "Wrocław".to_string(),
                    street: "Warszawska".to_string(),
                    house_number: "33".to_string(),
                    postal_code: "71-000".to_string(),
                    roles: vec![RoleName::User],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    #[serde(default = "default_seed_roles")]
    pub roles: Vec<RoleName>,
}

fn default_seed_roles() -> Vec<RoleName> {
    vec![RoleName::User]
}

impl SeedUser {
    pub fn registration(&self) -> RegisterUser {
        RegisterUser {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            matching_password: self.password.clone(),
            city: self.city.clone(),
            street: self.street.clone(),
            house_number: self.house_number.clone(),
            postal_code: self.postal_code.clone(),
        }
    }
}
