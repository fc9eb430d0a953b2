//! Transient user-facing notifications ("toasts").

use serde::Serialize;

/// Shown when the form is submitted with a blank field or no proof.
pub const MISSING_FIELDS: &str = "Please fill in all required fields and upload payment proof";

/// Shown after the registration has been handed to the sheet endpoint.
pub const SUBMITTED: &str =
    "Registration submitted successfully! Your payment proof has been uploaded.";

/// Shown when the registration could not be delivered.
pub const SUBMIT_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A single message for the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Confirmation that a proof file was accepted.
    pub fn file_selected(file_name: &str) -> Self {
        Self::success(format!("File \"{file_name}\" selected"))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
