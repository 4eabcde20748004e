//! Shared application state for axum handlers.

use std::sync::Arc;

use mockstore_app::ports::SnapshotStore;
use mockstore_app::services::catalog_service::CatalogService;
use mockstore_app::services::data_service::DataService;
use mockstore_domain::catalog::Catalog;
use mockstore_domain::dataset::DataSet;

/// Application state shared across all axum handlers.
///
/// Generic over the snapshot stores backing the catalog and the generic
/// data set, to avoid dynamic dispatch. `Clone` is implemented manually so
/// the stores themselves do not need to be `Clone`; only the `Arc` wrappers
/// are cloned.
pub struct AppState<CS, DS> {
    /// Typed collections (categories, customers, products).
    pub catalog_service: Arc<CatalogService<CS>>,
    /// Generic `id → record` data.
    pub data_service: Arc<DataService<DS>>,
}

impl<CS, DS> Clone for AppState<CS, DS> {
    fn clone(&self) -> Self {
        Self {
            catalog_service: Arc::clone(&self.catalog_service),
            data_service: Arc::clone(&self.data_service),
        }
    }
}

impl<CS, DS> AppState<CS, DS>
where
    CS: SnapshotStore<Catalog> + Send + Sync + 'static,
    DS: SnapshotStore<DataSet> + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(catalog_service: CatalogService<CS>, data_service: DataService<DS>) -> Self {
        Self {
            catalog_service: Arc::new(catalog_service),
            data_service: Arc::new(data_service),
        }
    }
}
