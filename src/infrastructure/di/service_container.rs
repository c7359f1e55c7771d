//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ChatService, TreeLibrary};
use crate::config::Settings;
use crate::infrastructure::store::JsonFileStore;
use crate::infrastructure::traits::{ChatBackend, TreeStore};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Named-tree persistence service
    pub library: TreeLibrary,

    /// Chat interpretation service
    pub chat: ChatService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// No delegated chat backend is wired up by default; the rule-based
    /// interpreter handles everything.
    pub fn new(settings: Settings) -> Self {
        let store = Arc::new(JsonFileStore::new(settings.data_file.clone()));
        Self::with_deps(settings, store, None)
    }

    /// Create a service container with custom dependencies (for testing or
    /// for injecting a delegated chat backend).
    pub fn with_deps(
        settings: Settings,
        store: Arc<dyn TreeStore>,
        backend: Option<Arc<dyn ChatBackend>>,
    ) -> Self {
        let settings = Arc::new(settings);
        let library = TreeLibrary::new(store);
        let chat = match backend {
            Some(backend) => ChatService::with_backend(backend),
            None => ChatService::new(),
        };

        Self {
            settings,
            library,
            chat,
        }
    }
}
