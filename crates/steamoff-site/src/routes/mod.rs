//! Route definitions for the event site.
//!
//! ## Routes
//!
//! - `GET /` - Landing page
//! - `GET /register` - Registration form
//! - `POST /register` - Attach a payment proof and/or submit (multipart)
//! - `GET /faqs` - Frequently asked questions
//! - `GET /api/countdown` - Countdown snapshot (JSON)
//! - `GET /api/countdown/stream` - Countdown ticks (SSE)
//! - `POST /api/update-sheet` - Append a registration row to the sheet
//! - `GET /opengraph-image.png` - Share image
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions

mod countdown;
mod health;
mod og;
mod pages;
mod register;
mod sheet;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use steamoff_core::{MAX_UPLOAD_BYTES, NavState};

use crate::error::SiteError;
use crate::render;
use crate::state::AppState;

/// Largest accepted multipart body. A proof that runs past it is reported as
/// too large, like any other oversized proof.
const MAX_FORM_BYTES: usize = 4 * MAX_UPLOAD_BYTES as usize;

/// Build the complete site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home_page))
        .route("/faqs", get(pages::faq_page))
        .route(
            "/register",
            get(register::register_page)
                .post(register::register_submit)
                .layer(DefaultBodyLimit::max(MAX_FORM_BYTES)),
        )
        .route("/api/countdown", get(countdown::countdown_snapshot))
        .route("/api/countdown/stream", get(countdown::countdown_stream))
        .route("/api/update-sheet", post(sheet::update_sheet))
        .route("/opengraph-image.png", get(og::og_image_handler))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .fallback(not_found)
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers except on the API.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\nDisallow: /api/\n",
    )
}

async fn not_found(uri: Uri) -> SiteError {
    SiteError::NotFound(uri.path().to_string())
}

/// `?menu=open` renders the mobile menu expanded for visitors without scripts.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NavQuery {
    menu: Option<String>,
}

impl NavQuery {
    pub(crate) fn nav_state(&self) -> NavState {
        NavState::rendered(self.menu.as_deref() == Some("open"))
    }
}

/// Build an HTTP response with HTML content and security/cache headers.
pub(crate) fn build_response(html: &str, cache_control: &'static str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(cache_control));

    (StatusCode::OK, headers, html.to_string()).into_response()
}
