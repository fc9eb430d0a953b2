//! Google Sheets append client.
//!
//! Authenticates as a service account: a short-lived RS256 JWT assertion is
//! exchanged at the OAuth token endpoint for a bearer token, which is cached
//! until shortly before it expires. Rows are appended with
//! `values.append` and `valueInputOption=USER_ENTERED`.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use steamoff_core::SheetRow;
use tokio::sync::Mutex;

use crate::config::SheetsConfig;

/// OAuth scope for read/write access to spreadsheets.
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh the cached token this many seconds before it actually expires.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Columns written by each append.
const COLUMNS: &str = "A:F";

#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The service-account credentials are not configured.
    #[error("sheets credentials are not configured")]
    NotConfigured,

    /// The private key could not be parsed or used for signing.
    #[error("service account key error: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),

    /// The request to Google failed before a response arrived.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API base URL cannot carry path segments.
    #[error("invalid sheets api url: {0}")]
    Url(String),

    /// The token endpoint refused the assertion.
    #[error("token exchange failed with {status}: {body}")]
    Auth { status: StatusCode, body: String },

    /// The Sheets API refused the append.
    #[error("append failed with {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// JWT claims for the service-account assertion.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct AppendBody {
    values: Vec<[String; 6]>,
}

/// Appends registration rows to the configured spreadsheet.
pub struct SheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
    key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Parse the service-account key and build a client.
    pub fn new(http: reqwest::Client, config: SheetsConfig) -> Result<Self, SheetsError> {
        let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())?;
        Ok(Self {
            http,
            config,
            key,
            token: Mutex::new(None),
        })
    }

    /// Build the signed assertion presented to the token endpoint.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: self.config.client_email.clone(),
            scope: SCOPE.to_string(),
            aud: self.config.token_url.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.key,
        )?)
    }

    /// A bearer token, reusing the cached one while it is still fresh.
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - TimeDelta::seconds(TOKEN_REFRESH_MARGIN_SECS) > now {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!(token_url = %self.config.token_url, "exchanging service account assertion");
        let assertion = self.assertion(now)?;
        let resp = self
            .http
            .post(&self.config.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Auth { status, body });
        }

        let token: TokenResponse = resp.json().await?;
        let expires_at = now + TimeDelta::seconds(token.expires_in as i64);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }

    /// `.../spreadsheets/{id}/values/{sheet}!A:F:append`
    fn append_url(&self) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| SheetsError::Url(format!("{}: {e}", self.config.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Url(self.config.api_url.clone()))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(&self.config.spreadsheet_id)
            .push("values")
            .push(&format!("{}!{COLUMNS}:append", self.config.sheet_name));
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }

    /// Append one registration row.
    pub async fn append_row(&self, row: &SheetRow) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let url = self.append_url()?;
        let body = AppendBody {
            values: vec![row.cells()],
        };

        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api { status, body });
        }

        tracing::info!(
            sheet = %self.config.sheet_name,
            cohort = %row.cohort,
            "registration row appended"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = include_str!("../testdata/service-account-key.pem");
    const TEST_PUB: &str = include_str!("../testdata/service-account-pub.pem");

    pub(crate) fn config(server: &MockServer) -> SheetsConfig {
        SheetsConfig {
            client_email: "sod@steamoff.iam.gserviceaccount.com".to_string(),
            private_key: TEST_KEY.to_string(),
            spreadsheet_id: "sheet-123".to_string(),
            sheet_name: "Registrations".to_string(),
            token_url: format!("{}/token", server.uri()),
            api_url: format!("{}/v4", server.uri()),
        }
    }

    fn row() -> SheetRow {
        SheetRow {
            first_name: "Ama".into(),
            last_name: "Boateng".into(),
            email: "ama@x.com".into(),
            phone: "0551234567".into(),
            cohort: "Cohort 2".into(),
            timestamp: "2025-02-01T09:30:00.000Z".into(),
        }
    }

    pub(crate) async fn mount_token(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.test",
                "expires_in": 3599,
                "token_type": "Bearer",
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[test]
    fn test_rejects_invalid_key() {
        let mut cfg = SheetsConfig {
            client_email: String::new(),
            private_key: "not a key".to_string(),
            spreadsheet_id: String::new(),
            sheet_name: String::new(),
            token_url: String::new(),
            api_url: String::new(),
        };
        assert!(SheetsClient::new(reqwest::Client::new(), cfg.clone()).is_err());
        cfg.private_key = TEST_KEY.to_string();
        assert!(SheetsClient::new(reqwest::Client::new(), cfg).is_ok());
    }

    #[tokio::test]
    async fn test_assertion_claims() {
        let server = MockServer::start().await;
        let client = SheetsClient::new(reqwest::Client::new(), config(&server)).unwrap();
        let now = Utc::now();
        let jwt = client.assertion(now).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[format!("{}/token", server.uri())]);
        let decoded = jsonwebtoken::decode::<Claims>(
            &jwt,
            &DecodingKey::from_rsa_pem(TEST_PUB.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.iss, "sod@steamoff.iam.gserviceaccount.com");
        assert_eq!(decoded.claims.scope, SCOPE);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, ASSERTION_LIFETIME_SECS);
    }

    #[tokio::test]
    async fn test_append_url_encodes_sheet_name() {
        let server = MockServer::start().await;
        let mut cfg = config(&server);
        cfg.sheet_name = "Sign Ups".to_string();
        let client = SheetsClient::new(reqwest::Client::new(), cfg).unwrap();
        let url = client.append_url().unwrap();
        assert!(
            url.path()
                .ends_with("/v4/spreadsheets/sheet-123/values/Sign%20Ups!A:F:append")
        );
        assert_eq!(url.query(), Some("valueInputOption=USER_ENTERED"));
    }

    #[tokio::test]
    async fn test_append_row() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-123/values/Registrations!A:F:append"))
            .and(query_param("valueInputOption", "USER_ENTERED"))
            .and(header("authorization", "Bearer ya29.test"))
            .and(body_string_contains("2/1/2025, 9:30:00 AM"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let client = SheetsClient::new(reqwest::Client::new(), config(&server)).unwrap();
        client.append_row(&row()).await.unwrap();
        // Second append reuses the cached token.
        client.append_row(&row()).await.unwrap();

        server.verify().await;
    }

    #[tokio::test]
    async fn test_token_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let client = SheetsClient::new(reqwest::Client::new(), config(&server)).unwrap();
        let err = client.append_row(&row()).await.unwrap_err();
        match err {
            SheetsError::Auth { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "invalid_grant");
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_rejection() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-123/values/Registrations!A:F:append"))
            .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
            .mount(&server)
            .await;

        let client = SheetsClient::new(reqwest::Client::new(), config(&server)).unwrap();
        let err = client.append_row(&row()).await.unwrap_err();
        assert!(matches!(err, SheetsError::Api { status, .. } if status == StatusCode::FORBIDDEN));
    }
}
