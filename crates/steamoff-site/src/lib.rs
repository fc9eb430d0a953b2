//! Steam-Off Daycation 2025 - event site and registration server.
//!
//! Serves the event's landing page, FAQ and registration form as
//! server-rendered HTML, and forwards completed registrations (with their
//! payment proof) to the spreadsheet script.
//!
//! # Architecture
//!
//! - **Render**: HTML pages built with maud (compile-time templates)
//! - **Session**: per-visitor form state in a moka cache, keyed by cookie
//! - **Submit**: validated registrations posted as one JSON request
//! - **Ticker**: live countdown pushed over server-sent events
//! - **Sheets**: service-account append of registration rows
//!
//! # Routes
//!
//! ```text
//! GET  /                      landing page with countdown
//! GET  /register              registration form
//! POST /register              select a proof file or submit (multipart)
//! GET  /faqs                  frequently asked questions
//! GET  /api/countdown         countdown snapshot (JSON)
//! GET  /api/countdown/stream  countdown ticks (SSE)
//! POST /api/update-sheet      append a row to the registrations sheet
//! ```
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - Strict Content-Security-Policy: only the site's own inline scripts run
//! - X-Frame-Options: DENY prevents clickjacking

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod session;
pub mod sheets;
pub mod state;
pub mod submit;
pub mod ticker;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
