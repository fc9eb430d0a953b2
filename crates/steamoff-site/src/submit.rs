//! Registration submission pipeline.
//!
//! On submit the form is validated, the payment proof is encoded as a data
//! URL, and exactly one JSON POST is sent to the registration endpoint. The
//! endpoint's response status is checked: anything other than a 2xx takes the
//! same failure path as a transport error, so the visitor can retry with the
//! form intact. Nothing is retried automatically.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use steamoff_core::notice::{SUBMIT_FAILED, SUBMITTED};
use steamoff_core::{MissingFields, Notice, RegistrationForm, RegistrationPayload};

/// Why a registration could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request never completed (DNS, connect, TLS, reset...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered, but not with success.
    #[error("registration endpoint returned {status}")]
    Rejected { status: StatusCode },
}

/// Sends a registration payload to wherever registrations are stored.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, payload: &RegistrationPayload) -> Result<(), DispatchError>;
}

/// Posts registrations to the spreadsheet script as JSON.
#[derive(Debug, Clone)]
pub struct ScriptDispatcher {
    client: reqwest::Client,
    url: String,
}

impl ScriptDispatcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Dispatcher for ScriptDispatcher {
    async fn dispatch(&self, payload: &RegistrationPayload) -> Result<(), DispatchError> {
        // `.json()` also sets `Content-Type: application/json`.
        let resp = self.client.post(&self.url).json(payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected { status });
        }

        tracing::debug!(status = %status, "registration endpoint accepted payload");
        Ok(())
    }
}

/// Result of one press of the submit button.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Required inputs were missing; nothing was sent.
    Invalid(MissingFields),
    /// The registration was delivered and the form has been reset.
    Submitted,
    /// Delivery failed; the form is unchanged.
    Failed(DispatchError),
}

impl SubmitOutcome {
    /// The notice shown to the visitor for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Invalid(missing) => Notice::error(missing.to_string()),
            Self::Submitted => Notice::success(SUBMITTED),
            Self::Failed(_) => Notice::error(SUBMIT_FAILED),
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Run the submission pipeline against `form`.
///
/// - missing input: no request, form untouched
/// - delivered: form reset
/// - failed: form untouched so the visitor can resubmit
pub async fn submit_registration(
    form: &mut RegistrationForm,
    dispatcher: &dyn Dispatcher,
    now: DateTime<Utc>,
) -> SubmitOutcome {
    let payload = match form.validate() {
        Ok(valid) => valid.payload(now),
        Err(missing) => {
            tracing::debug!(
                missing = ?missing.fields,
                proof_missing = missing.proof,
                "registration incomplete"
            );
            return SubmitOutcome::Invalid(missing);
        }
    };

    match dispatcher.dispatch(&payload).await {
        Ok(()) => {
            tracing::info!(
                cohort = %payload.cohort,
                file_type = %payload.file_type,
                "registration submitted"
            );
            form.reset();
            SubmitOutcome::Submitted
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration dispatch failed");
            SubmitOutcome::Failed(err)
        }
    }
}

/// Shared handle used by the application state.
pub type SharedDispatcher = Arc<dyn Dispatcher>;
