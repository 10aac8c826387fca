//! Field-level validation helpers shared by every request DTO.
//!
//! Request types derive [`validator::Validate`]; the resulting
//! [`ValidationErrors`] are flattened into a [`FieldErrors`] map so the API
//! layer can render `{ "field": ["message", ...] }` bodies.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Field name -> human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_TEXT: &str = "Not a valid string.";

/// A text field exactly as it arrived in a JSON body.
///
/// Numbers are accepted and coerced to their decimal form; any other JSON
/// type is kept as [`RawText::Other`] so it can be reported against its own
/// field instead of rejecting the whole body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl From<&str> for RawText {
    fn from(value: &str) -> Self {
        RawText::Text(value.to_string())
    }
}

/// Coerce a raw field to text, recording [`MSG_NOT_TEXT`] under `field`
/// when the value has the wrong JSON type.
pub fn coerce_text(field: &str, raw: Option<RawText>, errors: &mut FieldErrors) -> Option<String> {
    match raw? {
        RawText::Text(s) => Some(s),
        RawText::Integer(n) => Some(n.to_string()),
        RawText::Float(f) => Some(f.to_string()),
        RawText::Other(_) => {
            errors.insert(field.to_string(), vec![MSG_NOT_TEXT.to_string()]);
            None
        }
    }
}

/// Reject strings that are empty (callers trim before validating).
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("blank").with_message(MSG_BLANK.into()));
    }
    Ok(())
}

/// Trim an optional string in place.
pub fn trim_field(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        let trimmed = v.trim();
        if trimmed.len() != v.len() {
            *v = trimmed.to_string();
        }
    }
}

/// Flatten `validator` errors into a sorted field -> messages map.
///
/// Errors without an explicit message fall back to their code.
pub fn flatten(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        out.insert(field.to_string(), messages);
    }
    out
}

/// Validate `input`, adding its failures to `errors` for fields that do not
/// already carry one, and fail if anything was recorded.
pub fn validate_into<T: Validate>(input: &T, mut errors: FieldErrors) -> Result<(), CoreError> {
    if let Err(e) = input.validate() {
        for (field, messages) in flatten(&e) {
            errors.entry(field).or_insert(messages);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(errors))
    }
}

/// Build a single-field [`CoreError::InvalidFields`].
pub fn field_error(field: &str, message: impl Into<String>) -> CoreError {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.into()]);
    CoreError::InvalidFields(errors)
}
