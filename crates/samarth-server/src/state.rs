//! The process-wide working list and its one-time background load.

use std::sync::Arc;

use samarth_core::AdminEditor;
use samarth_store::ProductStore;
use tokio::task::JoinHandle;

use crate::api::AppState;

/// The working list, the admin edit slot, and whether the initial load is
/// still running. Views report `loading` until it completes.
pub struct CatalogState {
    pub loading: bool,
    pub editor: AdminEditor<Arc<ProductStore>>,
}

impl CatalogState {
    #[must_use]
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self {
            loading: true,
            editor: AdminEditor::new(Vec::new(), store),
        }
    }
}

/// Reconcile persisted edits with the defaults and publish the result.
///
/// Runs at most once: a list that is already published is left alone.
pub async fn initial_load(state: &AppState) {
    let products = state.store.load_working_list().await;
    let count = products.len();

    let mut catalog = state.catalog.write().await;
    if !catalog.loading {
        tracing::warn!("catalog already loaded; discarding duplicate initial load");
        return;
    }
    catalog.editor.load(products);
    catalog.loading = false;
    drop(catalog);

    tracing::info!(count, "catalog loaded");
}

pub fn spawn_initial_load(state: &AppState) -> JoinHandle<()> {
    let state = state.clone();
    tokio::spawn(async move { initial_load(&state).await })
}
