use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StorageBackend;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Version written into every document this build saves.
pub const JSON_SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    schema_version: u32,
    #[serde(default)]
    entries: BTreeMap<String, Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            schema_version: JSON_SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Parses a saved document. A top-level object without a version field is the
/// older flat layout where every key sat at the top level.
fn parse_document(contents: &str) -> Result<Option<Document>> {
    let Ok(root) = serde_json::from_str::<Value>(contents) else {
        return Ok(None);
    };
    let Value::Object(map) = root else {
        return Ok(None);
    };

    match map.get(SCHEMA_VERSION_FIELD).and_then(Value::as_u64) {
        Some(version) if version > u64::from(JSON_SCHEMA_VERSION) => bail!(
            "data file version ({version}) is newer than supported schema ({JSON_SCHEMA_VERSION})"
        ),
        Some(_) => Ok(serde_json::from_value(Value::Object(map)).ok()),
        None => Ok(Some(Document {
            schema_version: 0,
            entries: map.into_iter().collect(),
        })),
    }
}

/// All collections in one pretty-printed JSON file, held in memory and
/// rewritten on every change.
pub struct JsonFileBackend {
    path: PathBuf,
    data: RwLock<Document>,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read data from {}", path.display()))?;
            match parse_document(&contents)? {
                Some(document) => {
                    if document.schema_version < JSON_SCHEMA_VERSION {
                        log_info!(
                            "Upgrading {} from schema {} to {}",
                            path.display(),
                            document.schema_version,
                            JSON_SCHEMA_VERSION
                        );
                    }
                    document
                }
                None => {
                    set_aside_corrupt(&path);
                    Document::default()
                }
            }
        } else {
            Document::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Document> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Document> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, data: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;

        // The target is only ever replaced by a rename of a fully synced file.
        let tmp = temp_path(&self.path);
        {
            let mut file = File::create(&tmp)
                .with_context(|| format!("Failed to create {}", tmp.display()))?;
            file.write_all(serialized.as_bytes())
                .and_then(|()| file.sync_all())
                .with_context(|| format!("Failed to write data to {}", tmp.display()))?;
        }
        fs::rename(&tmp, &self.path).with_context(|| {
            format!("Failed to move {} over {}", tmp.display(), self.path.display())
        })
    }

    #[cfg(test)]
    fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data = parse_document(&contents)?
            .with_context(|| format!("{} is not a data document", self.path.display()))?;
        *self.write_guard() = data;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Keeps an unreadable file around under a `.corrupt` suffix so the next write
/// does not destroy it.
fn set_aside_corrupt(path: &Path) {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".corrupt");
    match fs::rename(path, &backup) {
        Ok(()) => log_warn!(
            "{} is unreadable, moved to {} and starting empty",
            path.display(),
            Path::new(&backup).display()
        ),
        Err(err) => log_warn!("{} is unreadable and could not be moved: {err}", path.display()),
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_guard().entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) -> Result<()> {
        let mut guard = self.write_guard();
        let mut next = guard.clone();
        next.schema_version = JSON_SCHEMA_VERSION;
        next.entries.insert(key.to_string(), value);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
