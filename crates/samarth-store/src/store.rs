//! The product store: defaults + persisted working list, reconciled.

use std::sync::Arc;

use samarth_core::admin::CatalogPersistence;
use samarth_core::product::{parse_product_list, to_pretty_json};
use samarth_core::{merge, AppConfig, Product};

use crate::defaults::DefaultsFetcher;
use crate::error::StoreError;
use crate::storage::{FileStorage, KeyValueStorage};

pub struct ProductStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    defaults: DefaultsFetcher,
}

impl std::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("key", &self.key)
            .field("defaults", &self.defaults.source())
            .finish_non_exhaustive()
    }
}

impl ProductStore {
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        key: impl Into<String>,
        defaults: DefaultsFetcher,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            defaults,
        }
    }

    /// File-backed store rooted at the configured state directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let defaults = DefaultsFetcher::new(
            config.defaults_source.clone(),
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(
            Arc::new(FileStorage::new(&config.state_dir)),
            config.storage_key.clone(),
            defaults,
        ))
    }

    /// The canonical list; empty when the source is unreachable or invalid.
    pub async fn fetch_defaults(&self) -> Vec<Product> {
        self.defaults.fetch().await
    }

    /// The stored working list, or `None` if nothing usable is stored.
    #[must_use]
    pub fn load_persisted(&self) -> Option<Vec<Product>> {
        let text = match self.storage.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read persisted products");
                return None;
            }
        };

        match parse_product_list(&text) {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring invalid persisted products");
                None
            }
        }
    }

    /// Overwrite the stored list with `products`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    pub fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let text = to_pretty_json(products).map_err(|source| StoreError::Catalog {
            context: self.key.clone(),
            source,
        })?;
        self.storage.set(&self.key, &text)?;
        tracing::info!(key = %self.key, count = products.len(), "persisted product list");
        Ok(())
    }

    /// Defaults reconciled with whatever is persisted.
    pub async fn load_working_list(&self) -> Vec<Product> {
        let defaults = self.fetch_defaults().await;
        let persisted = self.load_persisted();
        merge(persisted.as_deref(), &defaults)
    }
}

impl CatalogPersistence for ProductStore {
    type Error = StoreError;

    fn persist(&self, products: &[Product]) -> Result<(), Self::Error> {
        self.save(products)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use samarth_core::app_config::DefaultsSource;

    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "samarth-overseas-products";

    fn store_with(storage: MemoryStorage) -> ProductStore {
        let defaults = DefaultsFetcher::new(
            DefaultsSource::File(PathBuf::from("/nonexistent/products.json")),
            5,
            "samarth-test/0.1",
        )
        .unwrap();
        ProductStore::new(Arc::new(storage), KEY, defaults)
    }

    #[test]
    fn load_persisted_is_none_when_absent() {
        assert!(store_with(MemoryStorage::new()).load_persisted().is_none());
    }

    #[test]
    fn load_persisted_is_none_for_malformed_json() {
        let store = store_with(MemoryStorage::with_entry(KEY, "{not json"));
        assert!(store.load_persisted().is_none());
    }

    #[test]
    fn load_persisted_is_none_for_invalid_list() {
        let store = store_with(MemoryStorage::with_entry(KEY, r#"[{"id": "x"}]"#));
        assert!(store.load_persisted().is_none());
    }

    #[test]
    fn save_then_load_persisted() {
        let store = store_with(MemoryStorage::new());
        let products = vec![Product {
            id: "garlic".into(),
            name: "Garlic".into(),
            ..Product::default()
        }];
        store.save(&products).unwrap();
        assert_eq!(store.load_persisted(), Some(products));
    }

    #[tokio::test]
    async fn unreachable_defaults_degrade_to_empty() {
        let store = store_with(MemoryStorage::new());
        assert!(store.fetch_defaults().await.is_empty());
    }

    #[tokio::test]
    async fn working_list_keeps_persisted_items_when_defaults_fail() {
        let store = store_with(MemoryStorage::with_entry(
            KEY,
            r#"[{"id": "makhana", "name": "Makhana"}]"#,
        ));
        let list = store.load_working_list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "makhana");
    }
}
