use crate::loader::ReadyCatalog;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lifecycle of the loaded catalog. The service starts `Unloaded` and
/// handlers answer 503 until the loader installs a `Ready` catalog.
#[derive(Debug, Clone)]
pub enum CatalogState {
    Unloaded,
    Ready(Arc<ReadyCatalog>),
}

/// Holds the shared state accessible by all request handlers.
///
/// The catalog is immutable once Ready; readers clone the inner `Arc` and
/// drop the lock immediately, so queries never contend with each other.
/// A future rebuild-and-swap installs a fresh catalog under the single
/// write lock and readers only ever observe old-or-new, never a mix.
#[derive(Clone, Debug)]
pub struct AppState {
    catalog: Arc<RwLock<CatalogState>>,
}

impl AppState {
    /// Creates a new, unloaded application state.
    pub fn new() -> Self {
        AppState {
            catalog: Arc::new(RwLock::new(CatalogState::Unloaded)),
        }
    }

    /// Installs a loaded catalog, atomically replacing whatever was there.
    pub async fn install(&self, catalog: ReadyCatalog) {
        let mut guard = self.catalog.write().await;
        *guard = CatalogState::Ready(Arc::new(catalog));
    }

    /// Returns a handle to the catalog if the loader has reached Ready.
    pub async fn ready_catalog(&self) -> Option<Arc<ReadyCatalog>> {
        match &*self.catalog.read().await {
            CatalogState::Ready(catalog) => Some(catalog.clone()),
            CatalogState::Unloaded => None,
        }
    }

    /// Drops the loaded catalog, releasing index memory. Used at shutdown.
    pub async fn teardown(&self) {
        let mut guard = self.catalog.write().await;
        *guard = CatalogState::Unloaded;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
