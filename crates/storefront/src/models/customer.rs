//! Customer account types.

use ubermelon_core::Email;

/// A customer account.
///
/// Corresponds to a row in the `customers` table. Accounts are created once
/// at registration and read during login; they are never updated or deleted.
///
/// The stored credential is a plaintext string compared by equality at
/// login. Hashing it is a required hardening step before any real
/// deployment; this demo deliberately keeps the stored form untouched.
///
/// Implements `Debug` manually to redact the credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique account key.
    pub email: Email,
    /// Given name, shown in the site header after login.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext credential.
    pub password: String,
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
