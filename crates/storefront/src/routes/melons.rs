//! Melon catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use ubermelon_core::MelonId;

use crate::db::MelonRepository;
use crate::db::melons::DEFAULT_LIST_LIMIT;
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentIdentity, take_flashes};
use crate::models::Melon;
use crate::state::AppState;

/// Melon display data for templates.
#[derive(Clone)]
pub struct MelonView {
    pub id: i64,
    pub melon_type: String,
    pub common_name: String,
    pub price: String,
    pub imgurl: String,
    pub flesh_color: String,
    pub rind_color: String,
    pub seedless: bool,
}

impl From<&Melon> for MelonView {
    fn from(melon: &Melon) -> Self {
        Self {
            id: melon.id.as_i64(),
            melon_type: melon.melon_type.clone(),
            common_name: melon.common_name.clone(),
            price: melon.price.to_string(),
            imgurl: melon.imgurl.clone(),
            flesh_color: melon.flesh_color.clone(),
            rind_color: melon.rind_color.clone(),
            seedless: melon.seedless,
        }
    }
}

/// Melon listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "melons/index.html")]
pub struct MelonsIndexTemplate {
    pub melons: Vec<MelonView>,
    pub user: Option<String>,
    pub flashes: Vec<String>,
}

/// Melon detail page template.
///
/// `melon` is `None` when the requested ID is unknown; the page renders an
/// absent state rather than erroring.
#[derive(Template, WebTemplate)]
#[template(path = "melons/show.html")]
pub struct MelonShowTemplate {
    pub melon: Option<MelonView>,
    pub user: Option<String>,
    pub flashes: Vec<String>,
}

/// Display the melon listing page.
#[instrument(skip(state, session, identity))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse> {
    let melons = MelonRepository::new(state.pool())
        .list(DEFAULT_LIST_LIMIT)
        .await?;

    Ok(MelonsIndexTemplate {
        melons: melons.iter().map(MelonView::from).collect(),
        user: identity.map(|who| who.first_name),
        flashes: take_flashes(&session).await?,
    })
}

/// Display the melon detail page.
#[instrument(skip(state, session, identity))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    session: Session,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse> {
    let melon = MelonRepository::new(state.pool())
        .get_by_id(MelonId::new(id))
        .await?;

    Ok(MelonShowTemplate {
        melon: melon.as_ref().map(MelonView::from),
        user: identity.map(|who| who.first_name),
        flashes: take_flashes(&session).await?,
    })
}
