//! Customer repository for account storage and login checks.

use sqlx::SqlitePool;

use ubermelon_core::Email;

use super::RepositoryError;
use crate::models::Customer;

/// Row shape for the `customers` table.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    email: Email,
    first_name: String,
    last_name: String,
    password: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            password: row.password,
        }
    }
}

/// Outcome of a login check.
///
/// The three cases are ordinary control flow for the login route, each with
/// its own user-facing message, so they are modeled as data rather than as
/// errors.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Email and credential both matched.
    Authenticated(Customer),
    /// The email is registered but the credential does not match.
    WrongPassword,
    /// No account exists for the email.
    NotRegistered,
}

/// Repository for customer account operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered, `RepositoryError::Database` for other failures.
    pub async fn create(&self, customer: &Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customers (email, first_name, last_name, password)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(customer.email.as_str())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.password)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Check a login attempt against the stored account.
    ///
    /// The credential comparison is direct string equality; see
    /// [`Customer`] for why the stored form is plaintext.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails. A missing
    /// account or mismatched credential is an [`AuthOutcome`], not an error.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT email, first_name, last_name, password
            FROM customers
            WHERE email = ?
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(match row {
            None => AuthOutcome::NotRegistered,
            Some(row) if row.password == password => AuthOutcome::Authenticated(row.into()),
            Some(_) => AuthOutcome::WrongPassword,
        })
    }
}
