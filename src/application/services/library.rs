//! Tree library: named trees with persistence and chat transcripts

use std::sync::Arc;

use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{BinaryTree, ChatEntry, NodeRepr, TreeRecord};
use crate::infrastructure::traits::TreeStore;

/// Service managing the collection of labeled trees.
///
/// The whole library is loaded and saved per operation; trees are small and
/// the store serializes one JSON document. Concurrent mutation of the same
/// library is the caller's problem, there is no locking here.
pub struct TreeLibrary {
    store: Arc<dyn TreeStore>,
}

impl TreeLibrary {
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self { store }
    }

    /// Names of all stored trees, sorted.
    pub fn list(&self) -> ApplicationResult<Vec<String>> {
        let records = self.store.load().with_store_context("load tree library")?;
        Ok(records.keys().cloned().collect())
    }

    /// Create a new labeled tree, optionally with a root node.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, name: &str, root: Option<i64>) -> ApplicationResult<()> {
        let mut records = self.store.load().with_store_context("load tree library")?;
        if records.contains_key(name) {
            return Err(ApplicationError::TreeAlreadyExists(name.to_string()));
        }
        records.insert(
            name.to_string(),
            TreeRecord {
                tree: root.map(NodeRepr::leaf),
                history: Vec::new(),
            },
        );
        self.store.save(&records).with_store_context("save tree library")
    }

    /// Remove a stored tree and its transcript.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&self, name: &str) -> ApplicationResult<()> {
        let mut records = self.store.load().with_store_context("load tree library")?;
        if records.remove(name).is_none() {
            return Err(ApplicationError::TreeNotFound(name.to_string()));
        }
        self.store.save(&records).with_store_context("save tree library")
    }

    /// Rename a stored tree, keeping its contents and transcript.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&self, old: &str, new: &str) -> ApplicationResult<()> {
        let mut records = self.store.load().with_store_context("load tree library")?;
        if records.contains_key(new) {
            return Err(ApplicationError::TreeAlreadyExists(new.to_string()));
        }
        let record = records
            .remove(old)
            .ok_or_else(|| ApplicationError::TreeNotFound(old.to_string()))?;
        records.insert(new.to_string(), record);
        self.store.save(&records).with_store_context("save tree library")
    }

    /// Reset a tree to the empty state (transcript is kept).
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&self, name: &str) -> ApplicationResult<()> {
        self.with_record(name, |record| {
            record.tree = None;
        })
    }

    /// Load the tree stored under `name`.
    ///
    /// `Ok(None)` means the tree exists but holds no nodes; an unknown name
    /// is an error.
    pub fn load_tree(&self, name: &str) -> ApplicationResult<Option<BinaryTree>> {
        let records = self.store.load().with_store_context("load tree library")?;
        let record = records
            .get(name)
            .ok_or_else(|| ApplicationError::TreeNotFound(name.to_string()))?;
        Ok(record
            .tree
            .as_ref()
            .map(|repr| BinaryTree::from_repr(Some(repr))))
    }

    /// Persist the tree under `name`. An empty tree is stored as the
    /// explicit empty marker.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn save_tree(&self, name: &str, tree: &BinaryTree) -> ApplicationResult<()> {
        self.with_record(name, |record| {
            record.tree = tree.to_repr();
        })
    }

    /// Append one message/response pair to a tree's transcript.
    pub fn append_history(&self, name: &str, entry: ChatEntry) -> ApplicationResult<()> {
        self.with_record(name, |record| {
            record.history.push(entry);
        })
    }

    /// Chat transcript of a tree, oldest first.
    pub fn history(&self, name: &str) -> ApplicationResult<Vec<ChatEntry>> {
        let records = self.store.load().with_store_context("load tree library")?;
        let record = records
            .get(name)
            .ok_or_else(|| ApplicationError::TreeNotFound(name.to_string()))?;
        Ok(record.history.clone())
    }

    /// Drop a tree's transcript.
    pub fn clear_history(&self, name: &str) -> ApplicationResult<()> {
        self.with_record(name, |record| {
            record.history.clear();
        })
    }

    fn with_record(
        &self,
        name: &str,
        mutate: impl FnOnce(&mut TreeRecord),
    ) -> ApplicationResult<()> {
        let mut records = self.store.load().with_store_context("load tree library")?;
        let record = records
            .get_mut(name)
            .ok_or_else(|| ApplicationError::TreeNotFound(name.to_string()))?;
        mutate(record);
        self.store.save(&records).with_store_context("save tree library")
    }
}
