//! End-to-end tests driving the full router against an in-memory database.
//!
//! Each test builds the real application stack (router, session layer,
//! repositories) over a fresh `SQLite` in-memory database and issues
//! requests with `tower::ServiceExt::oneshot`, carrying the session cookie
//! between requests the way a browser would.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use ubermelon_storefront::config::StorefrontConfig;
use ubermelon_storefront::state::AppState;
use ubermelon_storefront::{build_app, db, middleware};

// =============================================================================
// Test Harness
// =============================================================================

async fn seed_melons(pool: &SqlitePool) {
    for (id, name, cents, imgurl) in [
        (1_i64, "Honeydew", 250_i64, "/static/images/honeydew.jpg"),
        (2, "Canary", 325, "/static/images/canary.jpg"),
        (3, "Crenshaw", 399, "/static/images/crenshaw.jpg"),
        (4, "Backroom Melon", 999, ""),
    ] {
        sqlx::query(
            r"
            INSERT INTO melons
                (id, melon_type, common_name, price_cents, imgurl,
                 flesh_color, rind_color, seedless)
            VALUES (?, 'Muskmelon', ?, ?, ?, 'orange', 'green', FALSE)
            ",
        )
        .bind(id)
        .bind(name)
        .bind(cents)
        .bind(imgurl)
        .execute(pool)
        .await
        .unwrap();
    }
}

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        session_secret: SecretString::from("k9#mQ2$vX7!pL4@wR8&nT5*zB1^jH6%dF3"),
        sentry_dsn: None,
    }
}

async fn test_app() -> Router {
    // A single connection keeps the in-memory database alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::MIGRATOR.run(&pool).await.unwrap();
    seed_melons(&pool).await;

    let config = test_config();
    let state = AppState::new(config.clone(), pool.clone());
    let session_layer = middleware::create_session_layer(&pool, &config)
        .await
        .unwrap();

    build_app(state, session_layer)
}

/// A minimal browser: replays the session cookie and follows nothing.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, request: Request<Body>) -> Response<axum::body::Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            self.cookie = Some(pair);
        }

        response
    }

    async fn get(&mut self, uri: &str) -> Response<axum::body::Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&mut self, uri: &str, body: &'static str) -> Response<axum::body::Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }
}

async fn body_text(response: Response<axum::body::Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirects_to(response: &Response<axum::body::Body>, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        target,
        "unexpected redirect target"
    );
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let mut client = Client::new(test_app().await);

    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    let response = client.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_melon_listing_shows_catalog_with_images_only() {
    let mut client = Client::new(test_app().await);

    let response = client.get("/melons").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Honeydew"));
    assert!(body.contains("Canary"));
    assert!(body.contains("Crenshaw"));
    assert!(body.contains("$3.99"));
    // Row 4 has no image and must not be listed
    assert!(!body.contains("Backroom Melon"));
}

#[tokio::test]
async fn test_melon_detail_known_and_unknown() {
    let mut client = Client::new(test_app().await);

    let response = client.get("/melon/3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Crenshaw"));
    assert!(body.contains("$3.99"));
    assert!(body.contains("/add_to_cart/3"));

    // Unknown ID renders an absent page, not an error
    let response = client.get("/melon/999").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("find that melon"));
}

#[tokio::test]
async fn test_add_unknown_melon_flashes_and_redirects() {
    let mut client = Client::new(test_app().await);

    let response = client.get("/add_to_cart/999").await;
    assert_redirects_to(&response, "/melons");

    let body = body_text(client.get("/melons").await).await;
    assert!(body.contains("Sorry! We do not carry that melon."));
}

#[tokio::test]
async fn test_anonymous_visitor_can_use_the_cart() {
    let mut client = Client::new(test_app().await);

    let response = client.get("/add_to_cart/1").await;
    assert_redirects_to(&response, "/cart");

    let body = body_text(client.get("/cart").await).await;
    assert!(body.contains("Melon added to cart."));
    assert!(body.contains("Honeydew"));
    assert!(body.contains("$2.50"));
}

#[tokio::test]
async fn test_flash_messages_show_once() {
    let mut client = Client::new(test_app().await);

    client.get("/add_to_cart/1").await;

    let body = body_text(client.get("/cart").await).await;
    assert!(body.contains("Melon added to cart."));

    // Drained on first render
    let body = body_text(client.get("/cart").await).await;
    assert!(!body.contains("Melon added to cart."));
}

#[tokio::test]
async fn test_checkout_is_not_implemented() {
    let mut client = Client::new(test_app().await);
    client.get("/add_to_cart/1").await;

    let response = client.get("/checkout").await;
    assert_redirects_to(&response, "/melons");

    let body = body_text(client.get("/melons").await).await;
    assert!(body.contains("Checkout will be implemented in a future version."));

    // The cart is untouched by checkout
    let body = body_text(client.get("/cart").await).await;
    assert!(body.contains("Honeydew"));
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let mut client = Client::new(test_app().await);
    let form = "fname=Jo&lname=Lo&email=a%40x.com&password=pw1";

    let response = client.post_form("/register-process", form).await;
    assert_redirects_to(&response, "/login");
    let body = body_text(client.get("/login").await).await;
    assert!(body.contains("Please login for the first time."));

    let response = client.post_form("/register-process", form).await;
    assert_redirects_to(&response, "/login");
    let body = body_text(client.get("/login").await).await;
    assert!(body.contains("That email is already registered. Please log in."));
}

#[tokio::test]
async fn test_invalid_registration_email_bounces_back() {
    let mut client = Client::new(test_app().await);

    let response = client
        .post_form("/register-process", "fname=Jo&lname=Lo&email=nope&password=pw1")
        .await;
    assert_redirects_to(&response, "/register");

    let body = body_text(client.get("/register").await).await;
    assert!(body.contains("That does not look like an email address."));
}

#[tokio::test]
async fn test_full_shopping_and_auth_flow() {
    let mut client = Client::new(test_app().await);

    // Register, which does not log in by itself
    let response = client
        .post_form(
            "/register-process",
            "fname=Jo&lname=Lo&email=a%40x.com&password=pw1",
        )
        .await;
    assert_redirects_to(&response, "/login");

    // A wrong password is called out as such
    let response = client
        .post_form("/login-process", "email=a%40x.com&password=wrong")
        .await;
    assert_redirects_to(&response, "/login");
    let body = body_text(client.get("/login").await).await;
    assert!(body.contains("You have fat fingers. Enter your password again."));

    // An unknown email is pointed at registration instead
    let response = client
        .post_form("/login-process", "email=b%40x.com&password=pw1")
        .await;
    assert_redirects_to(&response, "/register");
    let body = body_text(client.get("/register").await).await;
    assert!(body.contains("You are not registered with the Uber Empire."));

    // The right credentials land on the catalog, logged in
    let response = client
        .post_form("/login-process", "email=a%40x.com&password=pw1")
        .await;
    assert_redirects_to(&response, "/melons");
    let body = body_text(client.get("/melons").await).await;
    assert!(body.contains("Welcome, Jo"));

    // Two adds of the same melon accumulate onto one line
    client.get("/add_to_cart/3").await;
    client.get("/add_to_cart/3").await;

    let body = body_text(client.get("/cart").await).await;
    assert!(body.contains("Crenshaw"));
    assert!(body.contains(r#"<td class="qty">2</td>"#));
    assert!(body.contains("$7.98"));

    // Logout clears both the identity and the cart
    let response = client.get("/logout-process").await;
    assert_redirects_to(&response, "/login");
    let body = body_text(client.get("/login").await).await;
    assert!(body.contains("Logged out."));
    assert!(!body.contains("Welcome, Jo"));

    let body = body_text(client.get("/cart").await).await;
    assert!(body.contains("Your cart is empty."));
}
