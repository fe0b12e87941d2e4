//! Cart route handlers.
//!
//! The cart is stored whole in the session; every mutation loads it,
//! applies the change, and writes it back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;
use tracing::instrument;

use ubermelon_core::MelonId;

use crate::cart::CartState;
use crate::db::MelonRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentIdentity, flash, take_flashes};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|(id, line)| CartItemView {
                    id: id.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price.to_string(),
                })
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, or an empty one if none exists yet.
async fn load_cart(session: &Session) -> Result<CartState> {
    Ok(session
        .get::<CartState>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &CartState) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Clear the session's cart. Invoked on logout.
pub(crate) async fn clear_cart(session: &Session) -> Result<()> {
    let mut cart = load_cart(session).await?;
    cart.clear();
    save_cart(session, &cart).await
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub user: Option<String>,
    pub flashes: Vec<String>,
}

/// Display the cart page.
#[instrument(skip(session, identity))]
pub async fn show(
    session: Session,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
        user: identity.map(|who| who.first_name),
        flashes: take_flashes(&session).await?,
    })
}

/// Add one melon to the cart and redirect to the cart page.
///
/// An unknown melon ID is a user-visible miss, not a server fault: flash
/// and send the visitor back to the listing.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    session: Session,
) -> Result<Redirect> {
    let melon = MelonRepository::new(state.pool())
        .get_by_id(MelonId::new(id))
        .await?;

    let Some(melon) = melon else {
        flash(&session, "Sorry! We do not carry that melon.").await?;
        return Ok(Redirect::to("/melons"));
    };

    let mut cart = load_cart(&session).await?;
    cart.add(&melon);
    save_cart(&session, &cart).await?;

    flash(&session, "Melon added to cart.").await?;

    Ok(Redirect::to("/cart"))
}

/// Checkout is not implemented; flash a notice and return to the listing.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Redirect> {
    flash(
        &session,
        "Sorry! Checkout will be implemented in a future version.",
    )
    .await?;

    Ok(Redirect::to("/melons"))
}
