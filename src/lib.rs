mod utils;

pub mod config;
pub mod errors;
pub mod host;
pub mod ids;
pub mod journal;
pub mod models;
pub mod nutrition;
pub mod store;
pub mod view;

use anyhow::{Context, Result};
use log::info;

use config::{AppConfig, StoreKind};
use host::{attach_host, MiniAppHost};
use journal::Journal;
use store::{JsonFileBackend, SqliteBackend, StorageBackend, Store};

pub use errors::ValidationError;

pub fn open_store(config: &AppConfig) -> Result<Store> {
    let path = config.store_path();
    let backend: Box<dyn StorageBackend> = match config.store {
        StoreKind::Json => Box::new(JsonFileBackend::new(path)?),
        StoreKind::Sqlite => Box::new(SqliteBackend::new(path)?),
    };
    Ok(Store::new(backend))
}

/// Opens the configured store, loads every collection and attaches to the
/// mini-app host if there is one.
pub fn start(config: &AppConfig, host: Option<&dyn MiniAppHost>) -> Result<Journal> {
    let store = open_store(config)
        .with_context(|| format!("failed to open {} store", config.store.as_str()))?;
    info!("Using {} store at {}", config.store.as_str(), store.describe());

    let journal = Journal::load(store);
    let status = attach_host(host);

    let stats = journal.stats();
    info!(
        "Loaded {} foods, {} recipes, {} meal notes, {} weight entries ({}, language {})",
        stats.foods,
        stats.recipes,
        stats.meal_notes,
        stats.weight_entries,
        if status.is_embedded() { "embedded" } else { "standalone" },
        journal.language().as_str()
    );
    Ok(journal)
}

pub fn run() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::new()
        .filter_level(if config.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    info!("MealNote starting up...");

    let journal = start(&config, None)?;
    let today = nutrition::dates::today();
    let week = journal.weekly_summary(0, today);
    info!(
        "Today {}: {} kcal logged, {} kcal this week",
        nutrition::date_key(today),
        journal.day_totals(today).calories,
        week.totals().calories
    );

    Ok(())
}
