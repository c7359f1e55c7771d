//! I/O boundary traits for testability
//!
//! These traits abstract external dependencies, allowing services to be
//! tested with mock implementations.

use std::collections::BTreeMap;
use std::io;

use thiserror::Error;

use crate::application::interpreter::Reply;
use crate::domain::{BinaryTree, TreeRecord};

/// Persistent storage for the tree library.
///
/// The library is one document mapping tree names to records; implementations
/// decide the encoding and location.
pub trait TreeStore: Send + Sync {
    /// Load all records. A store that does not exist yet reads as empty.
    fn load(&self) -> io::Result<BTreeMap<String, TreeRecord>>;

    /// Persist all records, replacing the previous contents.
    fn save(&self, records: &BTreeMap<String, TreeRecord>) -> io::Result<()>;
}

/// Opaque failure from a delegated chat backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("chat backend failure: {0}")]
pub struct BackendError(pub String);

/// Delegated chat interpretation (e.g. an LLM-backed agent).
///
/// Implementations get the first shot at a message. Any error returned here
/// is swallowed by the chat service, which falls back to the rule-based
/// interpreter; it must never reach the end user.
pub trait ChatBackend: Send + Sync {
    fn interpret(&self, tree: &mut BinaryTree, message: &str) -> Result<Reply, BackendError>;
}
