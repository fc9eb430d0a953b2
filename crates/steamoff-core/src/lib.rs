//! Core types and rules for the Steam-Off Daycation registration site.
//!
//! This crate provides:
//! - The event countdown (days/hours/minutes/seconds until the doors open)
//! - Payment-proof upload validation and data-URL encoding
//! - The registration form state, its validation, and the outbound payload
//! - Navigation shell state (menu open / header scrolled)
//! - User-facing notices and shared error types
//!
//! Nothing here performs I/O. The HTTP server lives in `steamoff-site`.

pub mod countdown;
mod error;
pub mod nav;
pub mod notice;
pub mod registration;
pub mod upload;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Doors open: March 6, 2025 at 12:00 in Accra (GMT, no daylight saving).
pub const EVENT_START_RFC3339: &str = "2025-03-06T12:00:00Z";

/// Contact address shown on the registration form and FAQ.
pub const CONTACT_EMAIL: &str = "steamoffdaycation@gmail.com";

pub use countdown::{Countdown, EventClock};
pub use error::{Error, Result};
pub use nav::NavState;
pub use notice::{Notice, NoticeLevel};
pub use registration::{
    Cohort, Field, MissingFields, RegistrationForm, RegistrationPayload, SheetRow,
    ValidRegistration,
};
pub use upload::{
    ALLOWED_MEDIA_TYPES, MAX_UPLOAD_BYTES, PaymentProof, ProofKind, UploadError, validate_upload,
};
