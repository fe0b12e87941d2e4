//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative price in US dollars.
///
/// Constructed from integer cents so values are exact fixed-point amounts;
/// the catalog stores prices as cents and never as floats.
///
/// ## Examples
///
/// ```
/// use ubermelon_core::Price;
///
/// let price = Price::from_cents(399);
/// assert_eq!(price.to_string(), "$3.99");
/// assert_eq!((price + price).to_string(), "$7.98");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// A zero price, displayed as `$0.00`.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    /// The decimal amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Price {
    /// Format as `$x.xx`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
