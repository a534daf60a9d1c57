//! Link import service.
//!
//! Fetches an arbitrary external product page, extracts its Open-Graph
//! metadata, and normalizes it into the canonical [`Product`] shape so it
//! can be placed on the studio canvas.
//!
//! The URL is untrusted input: only http(s) schemes are fetched, requests
//! carry a timeout, and the response body is capped, so the importer cannot
//! be used as an open proxy.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use scraper::{Html, Selector};
use tracing::instrument;
use url::Url;

use lookbook_core::Product;

/// Request timeout for the page fetch. One attempt, no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum accepted response body size (2 MiB).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Some sites reject non-browser clients, so identify as one.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Name used when a page carries no `og:title`.
const FALLBACK_NAME: &str = "External Article";

/// Errors that can occur during a link import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The URL is not a fetchable http(s) URL.
    #[error("url must be a valid http or https address")]
    InvalidUrl,

    /// The page could not be fetched (network failure, timeout, non-success
    /// status).
    #[error("could not reach the page")]
    Unreachable,

    /// The response body exceeded the size cap.
    #[error("page too large to import")]
    TooLarge,

    /// The page has no usable image tag. Without an image there is nothing
    /// to place on the canvas.
    #[error("no product image found on the page")]
    MissingImage,
}

/// Open-Graph metadata pulled out of a fetched page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// `og:image`
    pub image: Option<String>,
    /// `og:title`
    pub title: Option<String>,
    /// `og:price:amount`, falling back to `product:price:amount`
    pub price_amount: Option<String>,
}

/// Client for importing products from external pages.
#[derive(Clone)]
pub struct LinkImporter {
    inner: Arc<LinkImporterInner>,
}

struct LinkImporterInner {
    client: reqwest::Client,
}

impl LinkImporter {
    /// Create a new link importer.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;

        Ok(Self {
            inner: Arc::new(LinkImporterInner { client }),
        })
    }

    /// Fetch a page and normalize its metadata into a [`Product`].
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidUrl` for non-http(s) URLs,
    /// `ImportError::Unreachable` when the fetch fails,
    /// `ImportError::TooLarge` when the body exceeds the cap, and
    /// `ImportError::MissingImage` when the page has no image tag.
    #[instrument(skip(self), fields(url = %raw_url))]
    pub async fn import_from_url(&self, raw_url: &str) -> Result<Product, ImportError> {
        let url = validate_url(raw_url)?;

        let mut response = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "link import fetch failed");
                ImportError::Unreachable
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "link import target returned non-success status");
            return Err(ImportError::Unreachable);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|_| ImportError::Unreachable)?
        {
            if body.len() + chunk.len() > MAX_BODY_BYTES {
                return Err(ImportError::TooLarge);
            }
            body.extend_from_slice(&chunk);
        }

        let html = String::from_utf8_lossy(&body);
        let metadata = extract_metadata(&html);

        normalize_metadata(metadata, raw_url)
    }
}

/// Validate an untrusted URL: well-formed and http(s) only.
fn validate_url(raw_url: &str) -> Result<Url, ImportError> {
    let url = Url::parse(raw_url).map_err(|_| ImportError::InvalidUrl)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ImportError::InvalidUrl);
    }

    Ok(url)
}

/// Pull the Open-Graph tags we care about out of a page.
fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        image: meta_content(&document, "og:image"),
        title: meta_content(&document, "og:title"),
        price_amount: meta_content(&document, "og:price:amount")
            .or_else(|| meta_content(&document, "product:price:amount")),
    }
}

/// Read the `content` attribute of a `<meta property=...>` tag.
fn meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(str::to_owned)
}

/// Normalize scraped metadata into a [`Product`].
///
/// Pure transformation. The image is mandatory; title and price have
/// fallbacks, and a malformed price amount becomes `0` rather than an error.
fn normalize_metadata(metadata: PageMetadata, source_url: &str) -> Result<Product, ImportError> {
    let image_url = metadata.image.ok_or(ImportError::MissingImage)?;

    let price_text = metadata.price_amount.unwrap_or_else(|| "0".to_string());
    let price_value = price_text.trim().parse::<Decimal>().unwrap_or_default();

    Ok(Product {
        id: None,
        name: metadata.title.unwrap_or_else(|| FALLBACK_NAME.to_string()),
        price_value,
        price_text,
        image_url,
        source_link: Some(source_url.to_string()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<html><head>
        <meta property="og:title" content="Wool coat" />
        <meta property="og:image" content="https://shop.example.com/coat.jpg" />
        <meta property="og:price:amount" content="129.90" />
        </head><body></body></html>"#;

    #[test]
    fn test_extract_metadata_full_page() {
        let metadata = extract_metadata(FULL_PAGE);
        assert_eq!(metadata.title.as_deref(), Some("Wool coat"));
        assert_eq!(
            metadata.image.as_deref(),
            Some("https://shop.example.com/coat.jpg")
        );
        assert_eq!(metadata.price_amount.as_deref(), Some("129.90"));
    }

    #[test]
    fn test_extract_metadata_product_price_fallback() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://shop.example.com/x.jpg" />
            <meta property="product:price:amount" content="15.50" />
            </head></html>"#;
        let metadata = extract_metadata(html);
        assert_eq!(metadata.price_amount.as_deref(), Some("15.50"));
    }

    #[test]
    fn test_extract_metadata_empty_page() {
        let metadata = extract_metadata("<html><head></head><body>nothing</body></html>");
        assert_eq!(metadata, PageMetadata::default());
    }

    #[test]
    fn test_normalize_full_metadata() {
        let metadata = extract_metadata(FULL_PAGE);
        let product = normalize_metadata(metadata, "https://shop.example.com/coat").unwrap();
        assert_eq!(product.name, "Wool coat");
        assert_eq!(product.image_url, "https://shop.example.com/coat.jpg");
        assert_eq!(product.price_value, "129.90".parse::<Decimal>().unwrap());
        assert_eq!(
            product.source_link.as_deref(),
            Some("https://shop.example.com/coat")
        );
        assert!(product.id.is_none());
    }

    #[test]
    fn test_normalize_missing_image_fails() {
        let metadata = PageMetadata {
            image: None,
            title: Some("Wool coat".to_string()),
            price_amount: Some("129.90".to_string()),
        };
        assert!(matches!(
            normalize_metadata(metadata, "https://shop.example.com/coat"),
            Err(ImportError::MissingImage)
        ));
    }

    #[test]
    fn test_normalize_title_and_price_fallbacks() {
        let metadata = PageMetadata {
            image: Some("https://shop.example.com/x.jpg".to_string()),
            title: None,
            price_amount: None,
        };
        let product = normalize_metadata(metadata, "https://shop.example.com/x").unwrap();
        assert_eq!(product.name, "External Article");
        assert_eq!(product.price_text, "0");
        assert_eq!(product.price_value, Decimal::ZERO);
    }

    #[test]
    fn test_normalize_malformed_price_falls_back_to_zero() {
        let metadata = PageMetadata {
            image: Some("https://shop.example.com/x.jpg".to_string()),
            title: Some("Coat".to_string()),
            price_amount: Some("not-a-number".to_string()),
        };
        let product = normalize_metadata(metadata, "https://shop.example.com/x").unwrap();
        assert_eq!(product.price_value, Decimal::ZERO);
    }

    #[test]
    fn test_validate_url_rejects_non_http_schemes() {
        assert!(matches!(
            validate_url("ftp://files.example.com/a"),
            Err(ImportError::InvalidUrl)
        ));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(ImportError::InvalidUrl)
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(ImportError::InvalidUrl)
        ));
    }

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://shop.example.com/p/1").is_ok());
        assert!(validate_url("https://shop.example.com/p/1").is_ok());
    }
}
