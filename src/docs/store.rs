//! On-disk JSON document store.
//!
//! Documents are named JSON files in a single data directory. Loads are
//! tolerant (missing or corrupt files read as absent); saves go through a
//! temp file and rename so the site never observes a half-written document.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read and parse a named document. Missing or unparsable files both
    /// come back as `None`; the caller decides whether that is fatal.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = name, "Document not present");
                return None;
            }
            Err(e) => {
                warn!(file = name, error = %e, "Document not readable");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(file = name, error = %e, "Document failed to parse");
                None
            }
        }
    }

    /// Serialize and write a named document, pretty-printed with a trailing
    /// newline, replacing any previous version atomically.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data dir {}", self.dir.display()))?;

        let mut body = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {name}"))?;
        body.push('\n');

        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        fs::write(&tmp, body).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        info!(file = name, "Document written");
        Ok(())
    }
}
