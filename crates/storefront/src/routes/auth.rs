//! Authentication route handlers.
//!
//! Login, registration, and logout. A session is anonymous until a login
//! succeeds, authenticated until logout, and anonymous again afterwards.
//! Registration never logs the customer in; it redirects to the login page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use ubermelon_core::Email;

use crate::db::{AuthOutcome, CustomerRepository, RepositoryError};
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentIdentity, clear_identity, flash, set_identity, take_flashes};
use crate::models::{Customer, SessionIdentity};
use crate::routes::cart::clear_cart;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<String>,
    pub flashes: Vec<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<String>,
    pub flashes: Vec<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    session: Session,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse> {
    Ok(LoginTemplate {
        user: identity.map(|who| who.first_name),
        flashes: take_flashes(&session).await?,
    })
}

/// Handle login form submission.
///
/// Each authentication outcome has its own message and destination: a bad
/// password returns to the login page, an unknown email suggests
/// registering, and a match stores the identity and shows the catalog.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let outcome = CustomerRepository::new(state.pool())
        .authenticate(&form.email, &form.password)
        .await?;

    match outcome {
        AuthOutcome::WrongPassword => {
            flash(&session, "You have fat fingers. Enter your password again.").await?;
            Ok(Redirect::to("/login"))
        }
        AuthOutcome::NotRegistered => {
            flash(&session, "You are not registered with the Uber Empire.").await?;
            Ok(Redirect::to("/register"))
        }
        AuthOutcome::Authenticated(customer) => {
            tracing::info!(email = %customer.email, "customer logged in");
            set_identity(
                &session,
                &SessionIdentity {
                    first_name: customer.first_name,
                    last_name: customer.last_name,
                },
            )
            .await?;
            Ok(Redirect::to("/melons"))
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    session: Session,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse> {
    Ok(RegisterTemplate {
        user: identity.map(|who| who.first_name),
        flashes: take_flashes(&session).await?,
    })
}

/// Handle registration form submission.
///
/// A duplicate email is rejected and pointed at the login page instead of
/// creating a second conflicting account.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let Ok(email) = Email::parse(&form.email) else {
        flash(&session, "That does not look like an email address.").await?;
        return Ok(Redirect::to("/register"));
    };

    let customer = Customer {
        email,
        first_name: form.fname,
        last_name: form.lname,
        password: form.password,
    };

    match CustomerRepository::new(state.pool()).create(&customer).await {
        Ok(()) => {
            tracing::info!(email = %customer.email, "customer registered");
            flash(&session, "Please login for the first time.").await?;
            Ok(Redirect::to("/login"))
        }
        Err(RepositoryError::Conflict) => {
            flash(&session, "That email is already registered. Please log in.").await?;
            Ok(Redirect::to("/login"))
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Unconditional: clears the identity, empties the cart, and lands on the
/// login page whether or not anyone was logged in.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_identity(&session).await?;
    clear_cart(&session).await?;

    flash(&session, "Logged out.").await?;

    Ok(Redirect::to("/login"))
}
