use crate::error::{Result, StockroomError};
use crate::model::DEFAULT_ROLE;
use crate::session::SESSION_FILENAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["products-file", "users-file", "roles-file", "default-role"];

/// Configuration for stockroom, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockroomConfig {
    /// File holding the product array, relative to the data dir
    #[serde(default = "default_products_file")]
    pub products_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_roles_file")]
    pub roles_file: String,

    /// Role given to users added without an explicit one
    #[serde(default = "default_role")]
    pub default_role: String,
}

fn default_products_file() -> String {
    "products.json".to_string()
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_roles_file() -> String {
    "roles.json".to_string()
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            products_file: default_products_file(),
            users_file: default_users_file(),
            roles_file: default_roles_file(),
            default_role: default_role(),
        }
    }
}

impl StockroomConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockroomError::Io)?;
        let config: StockroomConfig =
            serde_json::from_str(&content).map_err(StockroomError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockroomError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockroomError::Serialization)?;
        fs::write(config_path, content).map_err(StockroomError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "products-file" => Some(self.products_file.clone()),
            "users-file" => Some(self.users_file.clone()),
            "roles-file" => Some(self.roles_file.clone()),
            "default-role" => Some(self.default_role.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Value for {} cannot be empty", key));
        }
        match key {
            "products-file" => self.products_file = self.store_file_name(key, value)?,
            "users-file" => self.users_file = self.store_file_name(key, value)?,
            "roles-file" => self.roles_file = self.store_file_name(key, value)?,
            "default-role" => self.default_role = value.to_string(),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// A store file must be a bare name inside the data dir, distinct from the
    /// other stores and from the config and session files.
    fn store_file_name(&self, key: &str, value: &str) -> std::result::Result<String, String> {
        let mut components = Path::new(value).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_plain || value.contains('\\') {
            return Err(format!(
                "{} must be a file name inside the data directory, not a path: {}",
                key, value
            ));
        }

        let name = normalize_json_name(value);
        if name == CONFIG_FILENAME || name == SESSION_FILENAME {
            return Err(format!("{} is reserved for stockroom's own use", name));
        }
        let taken = KEYS
            .iter()
            .filter(|k| **k != key && k.ends_with("-file"))
            .find(|k| self.get(k).as_deref() == Some(name.as_str()));
        if let Some(other) = taken {
            return Err(format!("{} is already used by {}", name, other));
        }
        Ok(name)
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

fn normalize_json_name(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    }
}
