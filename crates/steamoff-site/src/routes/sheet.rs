//! Inbound sheet-append route.
//!
//! `POST /api/update-sheet` takes a registration row as JSON and appends it
//! to the configured spreadsheet. The registration form does not call this
//! route; it exists for other clients of the sheet.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use steamoff_core::SheetRow;

use crate::error::ApiError;
use crate::sheets::SheetsError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    success: bool,
}

/// Append one row to the registrations sheet.
pub async fn update_sheet(
    State(state): State<AppState>,
    body: Result<Json<SheetRow>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(row) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let sheets = state.sheets.as_ref().ok_or(SheetsError::NotConfigured)?;

    sheets.append_row(&row).await?;

    Ok(Json(SuccessResponse { success: true }))
}
