//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentIdentity, take_flashes};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<String>,
    pub flashes: Vec<String>,
}

/// Display the home page.
pub async fn home(
    session: Session,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse> {
    Ok(HomeTemplate {
        user: identity.map(|who| who.first_name),
        flashes: take_flashes(&session).await?,
    })
}
