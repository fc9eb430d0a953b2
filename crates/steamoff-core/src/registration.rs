//! Registration form state, validation, and the payloads built from it.
//!
//! A [`RegistrationForm`] lives for one form session. It is updated one field
//! at a time, validated on submit, and reset once the registration has been
//! dispatched.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;
use crate::notice::MISSING_FIELDS;
use crate::upload::{PaymentProof, UploadError};

// ═══════════════════════════════════════════════════════════════════════════
// Cohort
// ═══════════════════════════════════════════════════════════════════════════

/// Attendee category. The labels are what the sheet stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cohort {
    #[default]
    #[serde(rename = "Cohort 1")]
    Cohort1,
    #[serde(rename = "Cohort 2")]
    Cohort2,
    #[serde(rename = "Cohort 3")]
    Cohort3,
    #[serde(rename = "Cohort 4")]
    Cohort4,
    #[serde(rename = "Cohort 5")]
    Cohort5,
    #[serde(rename = "Guest")]
    Guest,
}

impl Cohort {
    pub const ALL: [Cohort; 6] = [
        Cohort::Cohort1,
        Cohort::Cohort2,
        Cohort::Cohort3,
        Cohort::Cohort4,
        Cohort::Cohort5,
        Cohort::Guest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cohort1 => "Cohort 1",
            Self::Cohort2 => "Cohort 2",
            Self::Cohort3 => "Cohort 3",
            Self::Cohort4 => "Cohort 4",
            Self::Cohort5 => "Cohort 5",
            Self::Guest => "Guest",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cohort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| Error::UnknownCohort(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Fields
// ═══════════════════════════════════════════════════════════════════════════

/// The scalar inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Cohort,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Cohort,
    ];

    /// The HTML `name` attribute, which is also the JSON key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Cohort => "cohort",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Cohort => "Cohort",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Submit was attempted with blank fields and/or no payment proof.
///
/// Displays as a single aggregated message regardless of how many inputs
/// are missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", MISSING_FIELDS)]
pub struct MissingFields {
    pub fields: Vec<Field>,
    pub proof: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Form state
// ═══════════════════════════════════════════════════════════════════════════

/// Mutable state of one registration form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cohort: Option<Cohort>,
    proof: Option<PaymentProof>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            cohort: Some(Cohort::default()),
            proof: None,
        }
    }
}

impl RegistrationForm {
    /// Apply a single input change. An empty cohort value clears the selection;
    /// an unknown label is rejected and leaves the form unchanged.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), Error> {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Cohort => {
                self.cohort = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
        }
        Ok(())
    }

    /// Current text of a field, as it should be echoed back into the input.
    pub fn value(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::FirstName => Cow::Borrowed(&self.first_name),
            Field::LastName => Cow::Borrowed(&self.last_name),
            Field::Email => Cow::Borrowed(&self.email),
            Field::Phone => Cow::Borrowed(&self.phone),
            Field::Cohort => Cow::Borrowed(self.cohort.map(|c| c.label()).unwrap_or_default()),
        }
    }

    /// Offer a file as payment proof.
    ///
    /// On rejection the previously accepted proof, if any, is kept.
    pub fn select_proof(
        &mut self,
        file_name: impl Into<String>,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<&PaymentProof, UploadError> {
        let proof = PaymentProof::new(file_name, media_type, bytes)?;
        Ok(&*self.proof.insert(proof))
    }

    pub fn proof(&self) -> Option<&PaymentProof> {
        self.proof.as_ref()
    }

    pub fn clear_proof(&mut self) {
        self.proof = None;
    }

    /// Back to the initial, empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check that every required input is filled in.
    pub fn validate(&self) -> Result<ValidRegistration<'_>, MissingFields> {
        let fields: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect();

        match (&self.proof, self.cohort) {
            (Some(proof), Some(cohort)) if fields.is_empty() => Ok(ValidRegistration {
                first_name: self.first_name.trim(),
                last_name: self.last_name.trim(),
                email: self.email.trim(),
                phone: self.phone.trim(),
                cohort,
                proof,
            }),
            _ => Err(MissingFields {
                fields,
                proof: self.proof.is_none(),
            }),
        }
    }
}

/// A form that has passed [`RegistrationForm::validate`].
#[derive(Debug, Clone, Copy)]
pub struct ValidRegistration<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub cohort: Cohort,
    pub proof: &'a PaymentProof,
}

impl ValidRegistration<'_> {
    /// Build the JSON body for the sheet endpoint, stamped with `now`.
    pub fn payload(&self, now: DateTime<Utc>) -> RegistrationPayload {
        RegistrationPayload {
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            cohort: self.cohort,
            timestamp: iso_timestamp(now),
            file_data: self.proof.to_data_url(),
            file_name: self.proof.file_name().to_string(),
            file_type: self.proof.media_type().to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════════════════════

/// Body POSTed to the spreadsheet script for each registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cohort: Cohort,
    pub timestamp: String,
    /// `data:<type>;base64,...`
    pub file_data: String,
    pub file_name: String,
    pub file_type: String,
}

/// Body accepted by the sheet-append route. Missing keys become empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cohort: String,
    pub timestamp: String,
}

impl SheetRow {
    /// The six cells appended to the sheet, in column order A..F.
    pub fn cells(&self) -> [String; 6] {
        [
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.cohort.clone(),
            display_timestamp(&self.timestamp),
        ]
    }
}

impl From<&RegistrationPayload> for SheetRow {
    fn from(p: &RegistrationPayload) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            cohort: p.cohort.label().to_string(),
            timestamp: p.timestamp.clone(),
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2025-02-01T09:30:00.000Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable form used in the sheet, e.g. `3/6/2025, 12:00:00 PM`.
///
/// Unparseable input is passed through untouched.
pub fn display_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled() -> RegistrationForm {
        let mut form = RegistrationForm::default();
        form.set_field(Field::FirstName, "Ama").unwrap();
        form.set_field(Field::LastName, "Boateng").unwrap();
        form.set_field(Field::Email, "ama@x.com").unwrap();
        form.set_field(Field::Phone, "0551234567").unwrap();
        form.set_field(Field::Cohort, "Cohort 2").unwrap();
        form.select_proof("proof.jpg", "image/jpeg", vec![0xFFu8, 0xD8, 0xFF])
            .unwrap();
        form
    }

    #[test]
    fn test_cohort_labels_round_trip() {
        for c in Cohort::ALL {
            assert_eq!(c.label().parse::<Cohort>().unwrap(), c);
        }
        assert!("Cohort 6".parse::<Cohort>().is_err());
    }

    #[test]
    fn test_cohort_serde_uses_label() {
        assert_eq!(serde_json::to_string(&Cohort::Guest).unwrap(), "\"Guest\"");
        let c: Cohort = serde_json::from_str("\"Cohort 4\"").unwrap();
        assert_eq!(c, Cohort::Cohort4);
    }

    #[test]
    fn test_field_names() {
        assert_eq!("firstName".parse::<Field>().unwrap(), Field::FirstName);
        assert!(matches!(
            "file".parse::<Field>(),
            Err(Error::UnknownField(_))
        ));
    }

    #[test]
    fn test_default_form_is_initial_state() {
        let form = RegistrationForm::default();
        assert_eq!(form.cohort, Some(Cohort::Cohort1));
        assert!(form.proof().is_none());
        assert_eq!(form.value(Field::Email), "");
    }

    #[test]
    fn test_set_field_unknown_cohort_keeps_previous() {
        let mut form = RegistrationForm::default();
        form.set_field(Field::Cohort, "Guest").unwrap();
        assert!(form.set_field(Field::Cohort, "Staff").is_err());
        assert_eq!(form.cohort, Some(Cohort::Guest));
    }

    #[test]
    fn test_validate_complete_form() {
        let form = filled();
        let valid = form.validate().unwrap();
        assert_eq!(valid.first_name, "Ama");
        assert_eq!(valid.cohort, Cohort::Cohort2);
        assert_eq!(valid.proof.file_name(), "proof.jpg");
    }

    #[test]
    fn test_validate_lists_every_missing_input() {
        let mut form = RegistrationForm::default();
        form.set_field(Field::FirstName, "Ama").unwrap();
        form.set_field(Field::Phone, "   ").unwrap();
        form.set_field(Field::Cohort, "").unwrap();

        let err = form.validate().unwrap_err();
        assert_eq!(
            err.fields,
            vec![Field::LastName, Field::Email, Field::Phone, Field::Cohort]
        );
        assert!(err.proof);
        assert_eq!(err.to_string(), MISSING_FIELDS);
    }

    #[test]
    fn test_validate_requires_proof() {
        let mut form = filled();
        form.clear_proof();
        let err = form.validate().unwrap_err();
        assert!(err.fields.is_empty());
        assert!(err.proof);
    }

    #[test]
    fn test_rejected_file_keeps_previous_proof() {
        let mut form = filled();
        let err = form
            .select_proof("party.gif", "image/gif", vec![1u8, 2, 3])
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
        assert_eq!(form.proof().unwrap().file_name(), "proof.jpg");

        let big = vec![0u8; 6 * 1024 * 1024];
        assert!(form.select_proof("big.png", "image/png", big).is_err());
        assert_eq!(form.proof().unwrap().file_name(), "proof.jpg");
    }

    #[test]
    fn test_accepted_file_replaces_previous_proof() {
        let mut form = filled();
        let proof = form
            .select_proof("receipt.pdf", "application/pdf", b"%PDF".to_vec())
            .unwrap();
        assert_eq!(proof.file_name(), "receipt.pdf");
        assert_eq!(form.proof().unwrap().media_type(), "application/pdf");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, RegistrationForm::default());
    }

    #[test]
    fn test_payload_contains_all_keys() {
        let form = filled();
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap();
        let payload = form.validate().unwrap().payload(now);
        let json = serde_json::to_value(&payload).unwrap();

        let obj = json.as_object().unwrap();
        for key in [
            "firstName",
            "lastName",
            "email",
            "phone",
            "cohort",
            "timestamp",
            "fileData",
            "fileName",
            "fileType",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 9);
        assert_eq!(json["cohort"], "Cohort 2");
        assert_eq!(json["timestamp"], "2025-02-01T09:30:00.000Z");
        assert_eq!(json["fileData"], "data:image/jpeg;base64,/9j/");
        assert_eq!(json["fileType"], "image/jpeg");
    }

    #[test]
    fn test_payload_trims_values() {
        let mut form = filled();
        form.set_field(Field::Email, "  ama@x.com ").unwrap();
        let payload = form.validate().unwrap().payload(Utc::now());
        assert_eq!(payload.email, "ama@x.com");
    }

    #[test]
    fn test_sheet_row_cells() {
        let row = SheetRow {
            first_name: "Kofi".into(),
            last_name: "Mensah".into(),
            email: "kofi@x.com".into(),
            phone: "0201112222".into(),
            cohort: "Guest".into(),
            timestamp: "2025-03-06T12:05:09.000Z".into(),
        };
        let cells = row.cells();
        assert_eq!(cells[4], "Guest");
        assert_eq!(cells[5], "3/6/2025, 12:05:09 PM");
    }

    #[test]
    fn test_sheet_row_missing_keys_default_to_empty() {
        let row: SheetRow = serde_json::from_str(r#"{"firstName":"Esi"}"#).unwrap();
        assert_eq!(row.first_name, "Esi");
        assert_eq!(row.email, "");
    }

    #[test]
    fn test_display_timestamp_passthrough() {
        assert_eq!(display_timestamp("not a date"), "not a date");
    }

    #[test]
    fn test_sheet_row_from_payload() {
        let form = filled();
        let payload = form.validate().unwrap().payload(Utc::now());
        let row = SheetRow::from(&payload);
        assert_eq!(row.cohort, "Cohort 2");
        assert_eq!(row.timestamp, payload.timestamp);
    }
}
