//! Wire types for the upstream catalog listing API.
//!
//! Deserialization is deliberately lenient: a missing or oddly-typed price
//! on one record must not take the whole listing down, so most fields carry
//! `#[serde(default)]`.

use serde::Deserialize;

/// Top-level listing response.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub products: Vec<ListingProduct>,
}

/// One product record as the upstream returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingProduct {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<ListingPrice>,
    /// Scheme-less host/path (e.g. `images.example.com/p/1.jpg`).
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Price container.
#[derive(Debug, Deserialize)]
pub struct ListingPrice {
    #[serde(default)]
    pub current: Option<CurrentPrice>,
}

/// The current price of a product.
#[derive(Debug, Deserialize)]
pub struct CurrentPrice {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub text: String,
}
