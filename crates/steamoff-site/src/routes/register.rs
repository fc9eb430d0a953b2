//! Registration form routes.
//!
//! `GET /register` renders the visitor's form session. `POST /register`
//! takes the multipart form, applies the text inputs, runs any attached file
//! through the upload rules and, for the `submit` action, hands the form to
//! the submission pipeline.

use axum::extract::multipart::Field as MultipartField;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use steamoff_core::{Field, MAX_UPLOAD_BYTES, Notice, validate_upload};

use super::{NavQuery, build_response};
use crate::error::SiteError;
use crate::render;
use crate::render::register::{ACTION_PART, FILE_PART};
use crate::session::FormSession;
use crate::state::AppState;
use crate::submit::submit_registration;

/// Form pages carry per-visitor state.
const REGISTER_CACHE_CONTROL: &str = "private, no-store";

/// What the visitor pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Only attach the selected file.
    Upload,
    /// Attach the selected file, if any, then submit the registration.
    Submit,
}

impl Action {
    fn parse(value: &str) -> Self {
        match value {
            "upload" => Self::Upload,
            _ => Self::Submit,
        }
    }
}

/// A file part read from the request.
///
/// Bytes past the upload limit are counted but not kept.
struct Upload {
    file_name: String,
    media_type: String,
    size: u64,
    bytes: Vec<u8>,
    /// The request body limit cut the part off; nothing after it is readable.
    truncated: bool,
}

/// Render the registration form.
pub async fn register_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(nav): Query<NavQuery>,
) -> (CookieJar, Response) {
    let session = FormSession::load(&state.sessions, &jar).await;
    let markup = render::register::render(
        &session.form,
        &[],
        &nav.nav_state(),
        &state.config.base_url,
        &state.config.site_name,
    );
    let jar = session.save(&state.sessions, jar).await;
    (jar, build_response(&markup.into_string(), REGISTER_CACHE_CONTROL))
}

/// Apply a posted form and, when asked, submit it.
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(nav): Query<NavQuery>,
    mut multipart: Multipart,
) -> Result<(CookieJar, Response), SiteError> {
    let mut session = FormSession::load(&state.sessions, &jar).await;
    let mut notices = Vec::new();
    let mut action = Action::Submit;
    let mut upload = None;
    let mut field_rejected = false;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| SiteError::BadRequest(e.body_text()))?
    {
        let name = part.name().unwrap_or_default().to_string();

        if name == FILE_PART {
            upload = read_upload(part).await?;
            if upload.as_ref().is_some_and(|u| u.truncated) {
                break;
            }
            continue;
        }

        let value = part
            .text()
            .await
            .map_err(|e| SiteError::BadRequest(e.body_text()))?;

        if name == ACTION_PART {
            action = Action::parse(&value);
            continue;
        }

        match name.parse::<Field>() {
            Ok(field) => {
                if let Err(e) = session.form.set_field(field, value) {
                    tracing::debug!(error = %e, "rejected form value");
                    field_rejected = true;
                    notices.push(Notice::error("Please choose a cohort from the list"));
                }
            }
            Err(_) => tracing::debug!(part = %name, "ignoring unknown form part"),
        }
    }

    let mut upload_rejected = false;
    if let Some(upload) = upload {
        let checked = validate_upload(&upload.media_type, upload.size).and_then(|_| {
            session
                .form
                .select_proof(upload.file_name, &upload.media_type, upload.bytes)
                .map(|proof| Notice::file_selected(proof.file_name()))
        });
        match checked {
            Ok(notice) => notices.push(notice),
            Err(e) => {
                tracing::info!(
                    media_type = %upload.media_type,
                    size = upload.size,
                    reason = %e,
                    "payment proof rejected"
                );
                upload_rejected = true;
                notices.push(Notice::error(e.to_string()));
            }
        }
    }

    // A rejected file or value is reported on its own; nothing is sent.
    if action == Action::Submit && !upload_rejected && !field_rejected {
        let outcome =
            submit_registration(&mut session.form, state.dispatcher.as_ref(), Utc::now()).await;
        notices.push(outcome.notice());
    }

    let markup = render::register::render(
        &session.form,
        &notices,
        &nav.nav_state(),
        &state.config.base_url,
        &state.config.site_name,
    );
    let jar = session.save(&state.sessions, jar).await;

    Ok((jar, build_response(&markup.into_string(), REGISTER_CACHE_CONTROL)))
}

/// Read the file part. An empty file input (no name, no bytes) is `None`.
async fn read_upload(mut part: MultipartField<'_>) -> Result<Option<Upload>, SiteError> {
    let file_name = part.file_name().unwrap_or_default().to_string();
    let media_type = part.content_type().unwrap_or_default().to_string();

    let mut size: u64 = 0;
    let mut bytes = Vec::new();
    let mut truncated = false;
    loop {
        match part.chunk().await {
            Ok(Some(chunk)) => {
                size += chunk.len() as u64;
                if size <= MAX_UPLOAD_BYTES {
                    bytes.extend_from_slice(&chunk);
                }
            }
            Ok(None) => break,
            // Whatever the real size, it is past the proof limit.
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                size = size.max(MAX_UPLOAD_BYTES + 1);
                truncated = true;
                break;
            }
            Err(e) => return Err(SiteError::BadRequest(e.body_text())),
        }
    }

    if file_name.is_empty() && size == 0 {
        return Ok(None);
    }

    Ok(Some(Upload {
        file_name,
        media_type,
        size,
        bytes,
        truncated,
    }))
}
