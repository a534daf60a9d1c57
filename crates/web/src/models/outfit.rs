//! Outfit domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lookbook_core::{OutfitId, UserId, Username};

/// A single placed item on the outfit canvas.
///
/// A snapshot of a product image plus its 2-D placement. Items are embedded
/// in their outfit and have no lifecycle of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    /// Absolute image URL of the product.
    pub image_url: String,
    /// Price snapshot at the time the item was placed.
    pub price: Decimal,
    /// Horizontal canvas position.
    pub x: f64,
    /// Vertical canvas position.
    pub y: f64,
}

/// A saved outfit composition.
#[derive(Debug, Clone, Serialize)]
pub struct Outfit {
    /// Unique outfit ID.
    pub id: OutfitId,
    /// Creator reference. Creation always sets this; the option covers rows
    /// whose creator account was since removed. Such outfits are immutable.
    pub creator_id: Option<UserId>,
    /// Placed items, in canvas stacking order.
    pub items: Vec<OutfitItem>,
    /// Sum of the item prices, computed server-side on save.
    pub total_price: Decimal,
    /// When the outfit was saved.
    pub created_at: DateTime<Utc>,
}

/// An outfit joined with its creator's username for display.
#[derive(Debug, Clone)]
pub struct OutfitSummary {
    pub outfit: Outfit,
    pub creator_username: Option<Username>,
}
