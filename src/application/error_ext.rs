//! Error conversion helpers for store I/O

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add action context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// store.save(&records).with_store_context("save tree library")?;
    /// ```
    fn with_store_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_store_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Store {
            context: action.to_string(),
            source: e,
        })
    }
}
