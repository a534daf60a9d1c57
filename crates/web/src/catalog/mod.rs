//! Upstream catalog listing API client.
//!
//! Fetches product listings for a category from the third-party catalog API
//! (a `RapidAPI`-hosted listing endpoint) and normalizes every record into
//! the canonical [`Product`] shape. Responses are never cached; products are
//! constructed fresh per request.

mod conversions;
pub mod wire;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::instrument;

use lookbook_core::Product;

use crate::config::CatalogConfig;
use conversions::convert_listing_product;

/// Fixed page size for listing requests.
const PAGE_SIZE: u32 = 20;

/// Upstream request timeout. One attempt, no retries; a slow upstream
/// degrades to an error response instead of stalling the process.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the upstream catalog API.
///
/// All variants mean the same thing to the caller: the upstream listing is
/// unavailable and the catalog page renders degraded (empty, with a notice).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Network-level failure (connect, timeout).
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status.
    #[error("catalog API returned status {0}")]
    Status(u16),

    /// Upstream returned a payload we could not parse.
    #[error("malformed catalog payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the upstream catalog listing API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let endpoint = format!("https://{}/products/v2/list", config.host);

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint,
                config: config.clone(),
            }),
        })
    }

    /// Fetch one page of products for a category.
    ///
    /// Every upstream record is mapped through the normalizer; the result is
    /// display-ready.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on network failure, non-success status, or a
    /// malformed payload. Callers degrade to an empty listing.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn list_category(
        &self,
        category_id: &str,
        offset: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        let cfg = &self.inner.config;
        let offset = offset.to_string();
        let limit = PAGE_SIZE.to_string();

        let response = self
            .inner
            .client
            .get(&self.inner.endpoint)
            .query(&[
                ("store", cfg.store.as_str()),
                ("offset", offset.as_str()),
                ("categoryId", category_id),
                ("limit", limit.as_str()),
                ("country", cfg.country.as_str()),
                ("currency", cfg.currency.as_str()),
                ("lang", cfg.language.as_str()),
            ])
            .header("x-rapidapi-key", cfg.api_key.expose_secret())
            .header("x-rapidapi-host", &cfg.host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "catalog API returned non-success status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        let listing: wire::ListingResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "failed to parse catalog listing payload"
                );
                CatalogError::Parse(e)
            })?;

        Ok(listing
            .products
            .into_iter()
            .map(convert_listing_product)
            .collect())
    }
}
