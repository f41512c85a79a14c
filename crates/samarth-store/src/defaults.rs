//! Fetching the canonical product list.

use std::time::Duration;

use reqwest::Client;
use samarth_core::app_config::DefaultsSource;
use samarth_core::product::parse_product_list;
use samarth_core::Product;

use crate::error::StoreError;

/// Reads the defaults from a URL or a local JSON file. Single attempt, no retry.
#[derive(Debug, Clone)]
pub struct DefaultsFetcher {
    client: Client,
    source: DefaultsSource,
}

impl DefaultsFetcher {
    /// Creates a fetcher with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        source: DefaultsSource,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, source })
    }

    #[must_use]
    pub fn source(&self) -> &DefaultsSource {
        &self.source
    }

    /// Fetch and validate the defaults.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Http`] on network failure or an unreadable body.
    /// - [`StoreError::UnexpectedStatus`] for any non-2xx response.
    /// - [`StoreError::Io`] if the file cannot be read.
    /// - [`StoreError::Catalog`] if the body is not a valid product list.
    pub async fn try_fetch(&self) -> Result<Vec<Product>, StoreError> {
        let text = match &self.source {
            DefaultsSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(StoreError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                response.text().await?
            }
            DefaultsSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| StoreError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        parse_product_list(&text).map_err(|source| StoreError::Catalog {
            context: self.source.to_string(),
            source,
        })
    }

    /// Fetch the defaults, degrading to an empty list on any failure.
    pub async fn fetch(&self) -> Vec<Product> {
        match self.try_fetch().await {
            Ok(products) => {
                tracing::debug!(source = %self.source, count = products.len(), "loaded default products");
                products
            }
            Err(e) => {
                tracing::warn!(source = %self.source, error = %e, "failed to load default products");
                Vec::new()
            }
        }
    }
}
