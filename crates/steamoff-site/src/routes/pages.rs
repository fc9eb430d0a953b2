//! Static-ish pages: landing and FAQ.

use axum::extract::{Query, State};
use axum::response::Response;

use super::{NavQuery, build_response};
use crate::render;
use crate::state::AppState;

/// The landing page embeds a countdown snapshot, so keep caches short.
const HOME_CACHE_CONTROL: &str = "public, max-age=30, s-maxage=30";

const FAQ_CACHE_CONTROL: &str = "public, max-age=300, s-maxage=3600";

/// Render the landing page.
pub async fn home_page(State(state): State<AppState>, Query(nav): Query<NavQuery>) -> Response {
    let countdown = state.config.event.remaining_now();
    let markup = render::home::render(
        &countdown,
        &nav.nav_state(),
        &state.config.base_url,
        &state.config.site_name,
    );
    build_response(&markup.into_string(), HOME_CACHE_CONTROL)
}

/// Render the FAQ page.
pub async fn faq_page(State(state): State<AppState>, Query(nav): Query<NavQuery>) -> Response {
    let markup = render::faq::render(
        &nav.nav_state(),
        &state.config.base_url,
        &state.config.site_name,
    );
    build_response(&markup.into_string(), FAQ_CACHE_CONTROL)
}
