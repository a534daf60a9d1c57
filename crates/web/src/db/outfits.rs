//! Outfit repository for database operations.
//!
//! Outfit items are embedded in the row as JSONB; they have no identity of
//! their own. Creator-only deletion is enforced here with a single
//! conditional `DELETE` keyed on both id and creator, so no read-then-delete
//! window exists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use lookbook_core::{OutfitId, UserId, Username};

use super::RepositoryError;
use crate::models::outfit::{Outfit, OutfitItem, OutfitSummary};

/// Outcome of a conditional delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The outfit existed, belonged to the requester, and was removed.
    Deleted,
    /// The outfit exists but belongs to someone else (or to nobody).
    Forbidden,
    /// No outfit with that id.
    NotFound,
}

#[derive(sqlx::FromRow)]
struct OutfitRow {
    id: OutfitId,
    creator_id: Option<UserId>,
    items: serde_json::Value,
    total_price: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<OutfitRow> for Outfit {
    type Error = RepositoryError;

    fn try_from(row: OutfitRow) -> Result<Self, Self::Error> {
        let items: Vec<OutfitItem> = serde_json::from_value(row.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid outfit items: {e}")))?;

        Ok(Self {
            id: row.id,
            creator_id: row.creator_id,
            items,
            total_price: row.total_price,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OutfitListRow {
    id: OutfitId,
    creator_id: Option<UserId>,
    items: serde_json::Value,
    total_price: Decimal,
    created_at: DateTime<Utc>,
    creator_username: Option<Username>,
}

/// Repository for outfit database operations.
pub struct OutfitRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OutfitRepository<'a> {
    /// Create a new outfit repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new outfit and return it with its server-assigned id and
    /// creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, or
    /// `RepositoryError::DataCorruption` if the items cannot be serialized.
    pub async fn create(
        &self,
        creator_id: UserId,
        items: &[OutfitItem],
        total_price: Decimal,
    ) -> Result<Outfit, RepositoryError> {
        let items_json = serde_json::to_value(items)
            .map_err(|e| RepositoryError::DataCorruption(format!("unserializable items: {e}")))?;

        let row = sqlx::query_as::<_, OutfitRow>(
            r"
            INSERT INTO outfits (creator_id, items, total_price)
            VALUES ($1, $2, $3)
            RETURNING id, creator_id, items, total_price, created_at
            ",
        )
        .bind(creator_id)
        .bind(items_json)
        .bind(total_price)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get an outfit by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored items are invalid.
    pub async fn get(&self, id: OutfitId) -> Result<Option<Outfit>, RepositoryError> {
        let row = sqlx::query_as::<_, OutfitRow>(
            r"
            SELECT id, creator_id, items, total_price, created_at
            FROM outfits
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Outfit::try_from).transpose()
    }

    /// List all outfits, newest first, with the creator's username resolved
    /// for display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if any stored items are invalid.
    pub async fn list_all(&self) -> Result<Vec<OutfitSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, OutfitListRow>(
            r"
            SELECT o.id, o.creator_id, o.items, o.total_price, o.created_at,
                   u.username AS creator_username
            FROM outfits o
            LEFT JOIN users u ON u.id = o.creator_id
            ORDER BY o.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let items: Vec<OutfitItem> = serde_json::from_value(row.items).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid outfit items: {e}"))
            })?;

            summaries.push(OutfitSummary {
                outfit: Outfit {
                    id: row.id,
                    creator_id: row.creator_id,
                    items,
                    total_price: row.total_price,
                    created_at: row.created_at,
                },
                creator_username: row.creator_username,
            });
        }

        Ok(summaries)
    }

    /// Delete an outfit, but only if `requester` is its creator.
    ///
    /// The ownership check and the delete are one statement; outfits with an
    /// absent creator match no requester and so cannot be deleted at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn delete_by_creator(
        &self,
        id: OutfitId,
        requester: UserId,
    ) -> Result<DeleteOutcome, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM outfits
            WHERE id = $1 AND creator_id = $2
            ",
        )
        .bind(id)
        .bind(requester)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(DeleteOutcome::Deleted);
        }

        // Nothing was removed: distinguish "not yours" from "not there".
        // A concurrent delete between the two statements can only turn
        // Forbidden into NotFound, never permit an unauthorized removal.
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM outfits WHERE id = $1)
            ",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        if exists {
            Ok(DeleteOutcome::Forbidden)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }
}
