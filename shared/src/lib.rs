pub mod catalogue;
pub mod config;
pub mod database;
pub mod diagnostics;

pub use config::AppConfig;
pub use taskhub_atoms::DocumentStore;

/// Shared by every request. The store client is safe for concurrent use;
/// nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: DocumentStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: DocumentStore) -> Self {
        Self { config, store }
    }
}
