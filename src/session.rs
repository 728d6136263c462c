//! Scan Session
//!
//! Durable storage for enumeration results. Each data source writes its
//! results under its own key; other keys are left untouched.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Something that can persist a keyed section of scan results
pub trait Session {
    fn update(&mut self, key: &str, value: Value) -> Result<()>;
}

/// On-disk session document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl SessionRecord {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            data: Map::new(),
        }
    }
}

/// Session stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
    record: SessionRecord,
}

impl FileSession {
    /// Default session file location
    pub fn default_path() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("enum-lightsail").join("session.json");
        }
        if let Some(home) = dirs::home_dir() {
            return home.join(".enum-lightsail").join("session.json");
        }
        PathBuf::from("enum-lightsail-session.json")
    }

    /// Open an existing session file, or start a new session if the file
    /// does not exist yet. A file that exists but cannot be parsed is an
    /// error rather than being overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let record = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid session file {}", path.display()))?
        } else {
            tracing::info!("Starting new session at {}", path.display());
            SessionRecord::new()
        };

        Ok(Self { path, record })
    }

    pub fn id(&self) -> Uuid {
        self.record.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.data.get(key)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.record)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        Ok(())
    }
}

impl Session for FileSession {
    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        self.record.data.insert(key.to_string(), value);
        self.record.updated_at = Utc::now();
        self.save()?;

        tracing::debug!("Session {} updated key {}", self.record.id, key);
        Ok(())
    }
}
