// Application state module
// Immutable shared state handed to every connection by Arc handle

use crate::store::FileStore;

use super::types::Config;

/// Application state shared across connections.
///
/// Built once at startup from the loaded configuration; nothing in here is
/// mutated at runtime, so request handlers need no locks.
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let store = FileStore::new(&config.media.library_dir);
        Self { config, store }
    }
}
