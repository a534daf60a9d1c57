//! Outfit service.
//!
//! Creation, listing, and creator-only mutation of outfit compositions.
//! Edits are replacements: the edit flow seeds a fresh canvas from an
//! existing outfit and a subsequent save creates a new record.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use lookbook_core::{OutfitId, UserId};

use crate::db::RepositoryError;
use crate::db::outfits::{DeleteOutcome, OutfitRepository};
use crate::models::outfit::{Outfit, OutfitItem, OutfitSummary};

/// Errors that can occur during outfit operations.
#[derive(Debug, Error)]
pub enum OutfitError {
    /// No outfit with the requested id.
    #[error("outfit not found")]
    NotFound,

    /// The requester is not the outfit's creator.
    #[error("not the outfit's creator")]
    Forbidden,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outfit service.
pub struct OutfitService<'a> {
    outfits: OutfitRepository<'a>,
}

impl<'a> OutfitService<'a> {
    /// Create a new outfit service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            outfits: OutfitRepository::new(pool),
        }
    }

    /// Save a new outfit for an authenticated creator.
    ///
    /// The total price is recomputed from the items; any client-supplied
    /// total is ignored.
    ///
    /// # Errors
    ///
    /// Returns `OutfitError::Repository` if persistence fails.
    pub async fn create(
        &self,
        creator: UserId,
        items: Vec<OutfitItem>,
    ) -> Result<Outfit, OutfitError> {
        let total = total_of(&items);
        let outfit = self.outfits.create(creator, &items, total).await?;
        Ok(outfit)
    }

    /// Get an outfit by id.
    ///
    /// # Errors
    ///
    /// Returns `OutfitError::NotFound` if no such outfit exists.
    pub async fn get(&self, id: OutfitId) -> Result<Outfit, OutfitError> {
        self.outfits.get(id).await?.ok_or(OutfitError::NotFound)
    }

    /// List all outfits, newest first, with creator usernames resolved.
    ///
    /// # Errors
    ///
    /// Returns `OutfitError::Repository` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<OutfitSummary>, OutfitError> {
        let summaries = self.outfits.list_all().await?;
        Ok(summaries)
    }

    /// Get an outfit for editing, enforcing the creator-only rule.
    ///
    /// Read-only: the edit flow seeds a new canvas, it does not patch in
    /// place. Outfits without a creator are immutable to everyone.
    ///
    /// # Errors
    ///
    /// Returns `OutfitError::NotFound` if no such outfit exists.
    /// Returns `OutfitError::Forbidden` if `requester` is not the creator.
    pub async fn get_for_edit(
        &self,
        id: OutfitId,
        requester: UserId,
    ) -> Result<Outfit, OutfitError> {
        let outfit = self.get(id).await?;

        if outfit.creator_id != Some(requester) {
            return Err(OutfitError::Forbidden);
        }

        Ok(outfit)
    }

    /// Delete an outfit, enforcing the creator-only rule atomically at the
    /// storage layer.
    ///
    /// # Errors
    ///
    /// Returns `OutfitError::NotFound` if no such outfit exists.
    /// Returns `OutfitError::Forbidden` if `requester` is not the creator.
    pub async fn delete(&self, id: OutfitId, requester: UserId) -> Result<(), OutfitError> {
        match self.outfits.delete_by_creator(id, requester).await? {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::Forbidden => Err(OutfitError::Forbidden),
            DeleteOutcome::NotFound => Err(OutfitError::NotFound),
        }
    }
}

/// Sum the item prices.
fn total_of(items: &[OutfitItem]) -> Decimal {
    items.iter().map(|item| item.price).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: &str) -> OutfitItem {
        OutfitItem {
            image_url: "https://img.example.com/x.jpg".to_string(),
            price: price.parse().unwrap(),
            x: 10.0,
            y: 20.0,
        }
    }

    #[test]
    fn test_total_of_sums_item_prices() {
        let items = vec![item("10.00"), item("15.50")];
        assert_eq!(total_of(&items), "25.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(total_of(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_of_keeps_cents_exact() {
        // 0.1 + 0.2 must be exactly 0.3 in decimal arithmetic
        let items = vec![item("0.1"), item("0.2")];
        assert_eq!(total_of(&items), "0.3".parse::<Decimal>().unwrap());
    }
}
