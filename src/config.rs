use std::{env, path::PathBuf};

use anyhow::{bail, Result};

pub const DATA_DIR_VAR: &str = "MEALNOTE_DATA_DIR";
pub const STORE_VAR: &str = "MEALNOTE_STORE";
pub const DEBUG_VAR: &str = "MEALNOTE_DEBUG";

const APP_DIR_NAME: &str = "mealnote";
const FALLBACK_DATA_DIR: &str = ".mealnote";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreKind {
    #[default]
    Json,
    Sqlite,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Json => "json",
            StoreKind::Sqlite => "sqlite",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(StoreKind::Json),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => bail!("unknown {STORE_VAR} value '{other}' (expected json or sqlite)"),
        }
    }

    /// File name of the store inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::Json => "mealnote.json",
            StoreKind::Sqlite => "mealnote.sqlite3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub debug: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup(DATA_DIR_VAR) {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_data_dir(),
        };
        let store = match lookup(STORE_VAR) {
            Some(value) => StoreKind::parse(&value)?,
            None => StoreKind::default(),
        };
        let debug = lookup(DEBUG_VAR)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            data_dir,
            store,
            debug,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(self.store.file_name())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}
