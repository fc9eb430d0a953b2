//! Open Graph image generation.
//!
//! Renders the share card on first request:
//! - Black-to-charcoal gradient background (1200x630, standard OG dimensions)
//! - Event name in an orange-to-red gradient with the year below
//! - Tagline and a call to action with the site's host
//!
//! The PNG is cached in-memory to avoid regeneration on repeated requests.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::SiteError;
use crate::state::AppState;

/// OG image dimensions (standard Open Graph).
const OG_WIDTH: u32 = 1200;
const OG_HEIGHT: u32 = 630;

/// Font family string for SVG text (sans single quotes that confuse `format!`).
const FONT_FAMILY: &str = "Inter, Arial, Helvetica, sans-serif";

/// Handle a request for the share image.
///
/// Route: `GET /opengraph-image.png`
pub async fn og_image_handler(State(state): State<AppState>) -> Result<Response, SiteError> {
    let key = state.config.base_url.clone();

    if let Some(cached) = state.og_cache.get(&key).await {
        tracing::debug!("og image cache hit");
        return Ok(png_response(&cached));
    }

    tracing::debug!("og image cache miss, generating");

    let host = display_host(&state.config.base_url);
    let png_bytes = generate_og_image(host)?;
    state.og_cache.insert(key, png_bytes.clone()).await;

    Ok(png_response(&png_bytes))
}

/// Build an HTTP response with PNG content and cache headers.
fn png_response(png_bytes: &[u8]) -> Response {
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600, s-maxage=86400"),
        ),
    ];

    (StatusCode::OK, headers, png_bytes.to_vec()).into_response()
}

/// `https://sod.example/` -> `sod.example`
fn display_host(base_url: &str) -> &str {
    base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest)
        .trim_end_matches('/')
}

/// Escape text for inclusion in SVG markup.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Generate the share image as a PNG.
fn generate_og_image(host: &str) -> Result<Vec<u8>, SiteError> {
    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs><linearGradient id="bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="#000"/><stop offset="1" stop-color="#1a1a1a"/></linearGradient><linearGradient id="title" x1="0" y1="0" x2="1" y2="0"><stop offset="0" stop-color="#ff9500"/><stop offset="1" stop-color="#ff0000"/></linearGradient></defs><rect width="{w}" height="{h}" fill="url(#bg)"/>"##,
        w = OG_WIDTH,
        h = OG_HEIGHT,
    ));

    let cx = OG_WIDTH / 2;
    svg.push_str(&format!(
        r##"<text x="{cx}" y="200" text-anchor="middle" font-family="{font}" font-size="72" font-weight="bold" fill="url(#title)">STEAM-OFF DAYCATION</text><text x="{cx}" y="330" text-anchor="middle" font-family="{font}" font-size="120" font-weight="bold" fill="#fff">2025</text><text x="{cx}" y="410" text-anchor="middle" font-family="{font}" font-size="32" fill="#e5e5e5">Ghana's Premier House Party for MSc Business Analytics</text>"##,
        cx = cx,
        font = FONT_FAMILY,
    ));

    svg.push_str(&format!(
        r##"<rect x="{x}" y="470" width="600" height="70" rx="35" fill="#000" fill-opacity="0.7" stroke="#ff9500" stroke-width="2"/><text x="{cx}" y="514" text-anchor="middle" font-family="{font}" font-size="24" fill="#fff">Register Now at {host}</text>"##,
        x = cx - 300,
        cx = cx,
        font = FONT_FAMILY,
        host = escape_xml(host),
    ));

    svg.push_str("</svg>");

    // Text needs system fonts; without them only the shapes render.
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(&svg, &options)
        .map_err(|e| SiteError::Internal(anyhow::anyhow!("SVG parse error: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(OG_WIDTH, OG_HEIGHT)
        .ok_or_else(|| SiteError::Internal(anyhow::anyhow!("failed to create pixmap")))?;

    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let png_data = pixmap
        .encode_png()
        .map_err(|e| SiteError::Internal(anyhow::anyhow!("PNG encode error: {e}")))?;

    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_host() {
        assert_eq!(display_host("https://steamoff.vercel.app/"), "steamoff.vercel.app");
        assert_eq!(display_host("http://localhost:8080"), "localhost:8080");
        assert_eq!(display_host("sod.example"), "sod.example");
    }

    #[test]
    fn test_generates_png() {
        let png = generate_og_image("sod.example").unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
