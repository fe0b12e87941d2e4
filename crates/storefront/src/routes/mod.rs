//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page
//! GET  /health            - Health check
//!
//! # Catalog
//! GET  /melons            - Melon listing (up to 30)
//! GET  /melon/{id}        - Melon detail
//!
//! # Cart
//! GET  /cart              - Cart page
//! GET  /add_to_cart/{id}  - Add a melon, redirect to /cart
//! GET  /checkout          - Not implemented; flash and redirect to /melons
//!
//! # Auth
//! GET  /login             - Login page
//! POST /login-process     - Login action
//! GET  /register          - Registration page
//! POST /register-process  - Registration action
//! GET  /logout-process    - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod melons;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/login-process", post(auth::login))
        .route("/register", get(auth::register_page))
        .route("/register-process", post(auth::register))
        .route("/logout-process", get(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/melons", get(melons::index))
        .route("/melon/{id}", get(melons::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/add_to_cart/{id}", get(cart::add))
        .route("/checkout", get(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog routes
        .merge(catalog_routes())
        // Cart routes
        .merge(cart_routes())
        // Auth routes
        .merge(auth_routes())
}
