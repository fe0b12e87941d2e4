//! Melon repository for catalog queries.
//!
//! The catalog is read-only: listings and single-row lookups, nothing else.

use sqlx::SqlitePool;

use ubermelon_core::{MelonId, Price};

use super::RepositoryError;
use crate::models::Melon;

/// How many melons a listing page shows at most.
pub const DEFAULT_LIST_LIMIT: i64 = 30;

/// Row shape for the `melons` table.
#[derive(Debug, sqlx::FromRow)]
struct MelonRow {
    id: MelonId,
    melon_type: String,
    common_name: String,
    price_cents: i64,
    imgurl: String,
    flesh_color: String,
    rind_color: String,
    seedless: bool,
}

impl From<MelonRow> for Melon {
    fn from(row: MelonRow) -> Self {
        Self {
            id: row.id,
            melon_type: row.melon_type,
            common_name: row.common_name,
            price: Price::from_cents(row.price_cents),
            imgurl: row.imgurl,
            flesh_color: row.flesh_color,
            rind_color: row.rind_color,
            seedless: row.seedless,
        }
    }
}

/// Repository for melon catalog operations.
pub struct MelonRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MelonRepository<'a> {
    /// Create a new melon repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List up to `limit` melons that have an image, in catalog order.
    ///
    /// An empty catalog yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<Melon>, RepositoryError> {
        let rows = sqlx::query_as::<_, MelonRow>(
            r"
            SELECT id, melon_type, common_name, price_cents,
                   imgurl, flesh_color, rind_color, seedless
            FROM melons
            WHERE imgurl <> ''
            ORDER BY id
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Melon::from).collect())
    }

    /// Get a melon by its catalog ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails. An unknown ID
    /// is `Ok(None)`, never an error.
    pub async fn get_by_id(&self, id: MelonId) -> Result<Option<Melon>, RepositoryError> {
        let row = sqlx::query_as::<_, MelonRow>(
            r"
            SELECT id, melon_type, common_name, price_cents,
                   imgurl, flesh_color, rind_color, seedless
            FROM melons
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Melon::from))
    }
}
