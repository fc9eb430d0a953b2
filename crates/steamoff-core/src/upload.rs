//! Payment-proof upload rules.
//!
//! A proof must be declared as JPEG, PNG or PDF and be at most 5 MiB. The
//! declared media type is trusted as-is; the bytes are not sniffed.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Media types accepted for a payment proof, in display order.
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Largest accepted proof, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Value for an `<input type="file" accept=...>` attribute.
pub const ACCEPT_ATTR: &str = "image/jpeg,image/png,application/pdf";

/// Why a candidate file was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a valid file (JPEG, PNG, or PDF)")]
    UnsupportedType { media_type: String },

    #[error("File size should be less than 5MB")]
    TooLarge { size: u64 },
}

/// The accepted kinds of payment proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofKind {
    Jpeg,
    Png,
    Pdf,
}

impl ProofKind {
    /// Map a declared media type to a proof kind. Matching is exact, as a
    /// browser reports it (`image/jpeg`, not `image/jpg`).
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
        })
    }
}

/// Check a candidate file's declared type and size.
///
/// The type is checked first, so an oversized GIF reports the type error.
pub fn validate_upload(media_type: &str, size: u64) -> Result<ProofKind, UploadError> {
    let kind =
        ProofKind::from_media_type(media_type).ok_or_else(|| UploadError::UnsupportedType {
            media_type: media_type.to_string(),
        })?;

    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }

    Ok(kind)
}

/// An accepted payment-proof file.
///
/// The bytes are shared so that cloning a form session stays cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentProof {
    file_name: String,
    kind: ProofKind,
    bytes: Arc<[u8]>,
}

impl PaymentProof {
    /// Validate and wrap an uploaded file.
    pub fn new(
        file_name: impl Into<String>,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, UploadError> {
        let bytes = bytes.into();
        let kind = validate_upload(media_type, bytes.len() as u64)?;
        Ok(Self {
            file_name: file_name.into(),
            kind,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &'static str {
        self.kind.media_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as `data:<media type>;base64,<payload>`, the same text a browser's
    /// `FileReader.readAsDataURL` produces.
    pub fn to_data_url(&self) -> String {
        let encoded = STANDARD.encode(&self.bytes);
        let mut out = String::with_capacity(encoded.len() + 32);
        out.push_str("data:");
        out.push_str(self.media_type());
        out.push_str(";base64,");
        out.push_str(&encoded);
        out
    }
}

// Keep multi-megabyte payloads out of debug logs.
impl fmt::Debug for PaymentProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentProof")
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
