//! Session-related types.
//!
//! Types stored in the session. A session holds at most three values: the
//! authenticated identity, the shopping cart, and any pending flash
//! messages. Everything else lives in the database.

use serde::{Deserialize, Serialize};

/// Session-stored identity of the logged-in customer.
///
/// Only display names are kept in the session; the account itself stays in
/// the database. Present after a successful login, absent for anonymous
/// sessions, removed on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Given name, shown in the site header.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Session keys for the values this application stores.
pub mod keys {
    /// Key for the logged-in customer's identity.
    pub const IDENTITY: &str = "identity";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for pending flash messages.
    pub const FLASH: &str = "flash";
}
