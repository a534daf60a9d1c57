//! The canonical normalized product shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as presented to the studio canvas and catalog views.
///
/// Every upstream representation (catalog API record, scraped page metadata)
/// is normalized into this shape before it reaches a template or the client.
/// Products are transient: constructed fresh per request, never persisted and
/// never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// External catalog identifier, when the product came from the listing
    /// API. Imported items have none.
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Numeric price, used for outfit total calculations.
    pub price_value: Decimal,
    /// Upstream display string for the price (e.g. `"21,99 €"`).
    pub price_text: String,
    /// Absolute image URL.
    pub image_url: String,
    /// Original page URL, set only for link-imported items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_link: Option<String>,
}
