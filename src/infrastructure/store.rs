//! JSON file persistence for the tree library

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::domain::TreeRecord;
use crate::infrastructure::traits::TreeStore;

/// Stores the whole library as one pretty-printed JSON document.
///
/// The tree shape inside the document is the nested wire format
/// (`{"value":10,"left":null,"right":null}`). A missing file reads as an
/// empty library; the parent directory is created on first save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TreeStore for JsonFileStore {
    #[instrument(level = "debug", skip(self))]
    fn load(&self) -> io::Result<BTreeMap<String, TreeRecord>> {
        if !self.path.exists() {
            debug!("store file missing, treating as empty: {}", self.path.display());
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    #[instrument(level = "debug", skip(self, records))]
    fn save(&self, records: &BTreeMap<String, TreeRecord>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, content)
    }
}
