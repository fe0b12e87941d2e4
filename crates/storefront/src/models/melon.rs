//! Melon catalog types.

use ubermelon_core::{MelonId, Price};

/// A melon in the catalog.
///
/// Corresponds to a row in the `melons` table. Catalog rows are immutable:
/// this application only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Melon {
    /// Catalog identifier.
    pub id: MelonId,
    /// Variety, e.g. "Muskmelon".
    pub melon_type: String,
    /// Display name, e.g. "Crenshaw".
    pub common_name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL; listing pages only show melons with a non-empty image.
    pub imgurl: String,
    /// Flesh color, e.g. "orange".
    pub flesh_color: String,
    /// Rind color, e.g. "green".
    pub rind_color: String,
    /// Whether the variety is seedless.
    pub seedless: bool,
}
