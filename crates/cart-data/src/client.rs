//! Storefront API client.

use std::time::Duration;

use async_trait::async_trait;
use cart_commerce::catalog::{Product, Stock};
use cart_commerce::config::ApiConfig;
use cart_commerce::ports::{ProductCatalog, StockLedger};
use cart_commerce::{ProductId, UpstreamError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::FetchError;

/// HTTP client for the storefront's `products` and `stock` resources.
///
/// Implements both [`ProductCatalog`] and [`StockLedger`]; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::build(base_url.into(), None)
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::build(
            config.base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self { http, base_url })
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Self::with_client(http, base_url)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a product resource.
    pub fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    /// URL of a stock resource.
    pub fn stock_url(&self, id: ProductId) -> String {
        format!("{}/stock/{}", self.base_url, id)
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: String, id: ProductId) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(id));
        }
        if !status.is_success() {
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

fn normalize_base_url(raw: String) -> Result<String, FetchError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(FetchError::InvalidUrl(raw));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl ProductCatalog for ApiClient {
    async fn fetch_product(&self, id: ProductId) -> Result<Product, UpstreamError> {
        Ok(self.get_json(self.product_url(id), id).await?)
    }
}

#[async_trait]
impl StockLedger for ApiClient {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, UpstreamError> {
        Ok(self.get_json(self.stock_url(id), id).await?)
    }
}
