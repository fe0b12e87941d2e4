//! Shopping cart state.
//!
//! The cart lives inside the session and is rebuilt from it on every
//! request; these types are plain data with the accumulation rules attached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ubermelon_core::Price;

use crate::models::Melon;

/// One melon variety in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Display name, copied from the catalog when the line is created.
    pub name: String,
    /// How many of this melon are in the cart.
    pub quantity: u32,
    /// Unit price captured when the line first entered the cart; later adds
    /// do not refresh it.
    pub unit_price: Price,
}

/// A session's shopping cart: lines keyed by melon ID plus a running total.
///
/// Map keys are the decimal string form of the melon ID so the cart
/// serializes as a plain JSON object inside the session record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartState {
    lines: BTreeMap<String, CartLine>,
    total: Price,
}

impl CartState {
    /// An empty cart with a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add one of the given melon to the cart.
    ///
    /// A new line starts at quantity 0 with the melon's current unit price,
    /// then the quantity is incremented. The running total accumulates the
    /// melon's current unit price once per add, independent of the price
    /// captured on the line.
    pub fn add(&mut self, melon: &Melon) {
        let line = self
            .lines
            .entry(melon.id.to_string())
            .or_insert_with(|| CartLine {
                name: melon.common_name.clone(),
                quantity: 0,
                unit_price: melon.price,
            });
        line.quantity += 1;

        self.total += melon.price;
    }

    /// Reset to an empty cart with a zero total. Invoked on logout.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Price::zero();
    }

    /// The cart lines, keyed by melon ID.
    #[must_use]
    pub const fn lines(&self) -> &BTreeMap<String, CartLine> {
        &self.lines
    }

    /// The running total across all add events.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of melons across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }
}
