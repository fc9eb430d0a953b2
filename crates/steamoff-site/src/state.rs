//! Application state shared across all request handlers.

use std::sync::Arc;

use moka::future::Cache;

use crate::config::Config;
use crate::session::{self, SessionStore};
use crate::sheets::SheetsClient;
use crate::submit::{ScriptDispatcher, SharedDispatcher};

/// Type alias for the OG image cache (image key -> PNG bytes).
pub type OgImageCache = Cache<String, Vec<u8>>;

/// Only a handful of images exist (one per site name), so this is generous.
const OG_CACHE_CAPACITY: u64 = 16;

/// OG image cache TTL.
const OG_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(3600);

/// Outbound request timeout for the registration endpoint and Google APIs.
const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Where submitted registrations are sent.
    pub dispatcher: SharedDispatcher,

    /// Registration form state keyed by session cookie.
    pub sessions: SessionStore,

    /// Sheet-append client; `None` when no service account is configured.
    pub sheets: Option<Arc<SheetsClient>>,

    /// In-memory OG image cache.
    pub og_cache: OgImageCache,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("steamoff-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let dispatcher: SharedDispatcher =
            Arc::new(ScriptDispatcher::new(http.clone(), config.script_url.clone()));

        let sheets = match &config.sheets {
            Some(sheets_config) => Some(Arc::new(SheetsClient::new(
                http,
                sheets_config.clone(),
            )?)),
            None => None,
        };

        Ok(Self::with_dispatcher(config, dispatcher, sheets))
    }

    /// Build state around an explicit dispatcher and sheets client.
    pub fn with_dispatcher(
        config: Config,
        dispatcher: SharedDispatcher,
        sheets: Option<Arc<SheetsClient>>,
    ) -> Self {
        let og_cache = Cache::builder()
            .max_capacity(OG_CACHE_CAPACITY)
            .time_to_live(OG_CACHE_TTL)
            .build();

        tracing::info!(
            script_url = %config.script_url,
            sheets_enabled = sheets.is_some(),
            og_cache_capacity = OG_CACHE_CAPACITY,
            og_cache_ttl_secs = OG_CACHE_TTL.as_secs(),
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            dispatcher,
            sessions: session::new_store(),
            sheets,
            og_cache,
        }
    }
}
