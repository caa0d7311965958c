//! Durable key -> value storage for the top-level collections.
//!
//! Each collection lives under its own key and is always written whole. There is
//! no cross-key transaction; nothing in the app ever needs two keys to change
//! together.

mod json_file;
mod migrations;
mod sqlite;

pub use json_file::{JsonFileBackend, JSON_SCHEMA_VERSION};
pub use sqlite::SqliteBackend;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{log_debug, log_warn};

const ENABLE_LOGS: bool = true;

/// Keys of the persisted collections.
pub mod keys {
    pub const LANGUAGE: &str = "language";
    pub const MEAL_NOTES: &str = "mealNotes";
    pub const FOODS: &str = "foods";
    pub const RECIPES: &str = "recipes";
    pub const PROFILE: &str = "profile";
    pub const WEIGHT_ENTRIES: &str = "weightEntries";

    pub const ALL: [&str; 6] = [LANGUAGE, MEAL_NOTES, FOODS, RECIPES, PROFILE, WEIGHT_ENTRIES];
}

/// Where the JSON values actually live.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Value>>;
    fn write(&self, key: &str, value: Value) -> Result<()>;
    /// Human-readable location for log lines.
    fn describe(&self) -> String;
}

pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    fn read_value(&self, key: &str) -> Option<Value> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(err) => {
                log_warn!("Failed to read '{key}' from {}: {err:#}", self.backend.describe());
                None
            }
        }
    }

    /// Previously stored value, or `default` when the key is absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.read_value(key) else {
            return default;
        };
        match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                log_warn!("Stored value for '{key}' is corrupt, using default: {err}");
                default
            }
        }
    }

    /// Like [`Store::get`] for arrays, but keeps the readable elements when only
    /// some of them are damaged.
    pub fn get_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let elements = match self.read_value(key) {
            Some(Value::Array(elements)) => elements,
            Some(_) => {
                log_warn!("Stored value for '{key}' is not a list, using empty list");
                return Vec::new();
            }
            None => return Vec::new(),
        };

        let total = elements.len();
        let parsed: Vec<T> = elements
            .into_iter()
            .filter_map(|element| serde_json::from_value(element).ok())
            .collect();
        if parsed.len() < total {
            log_warn!(
                "Skipped {} unreadable entries under '{key}'",
                total - parsed.len()
            );
        }
        parsed
    }

    /// Serializes and durably replaces the whole value under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("failed to serialize '{key}'"))?;
        if let Value::Array(items) = &value {
            log_debug!("Writing {} entries under '{key}'", items.len());
        }
        self.backend
            .write(key, value)
            .with_context(|| format!("failed to persist '{key}'"))
    }
}
