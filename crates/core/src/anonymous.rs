//! Session-scoped planting tallies for visitors without an account.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{coerce_text, not_blank, trim_field, validate_into, FieldErrors, RawText};

/// Request body for opening an anonymous tally.
#[derive(Debug, Default, Deserialize)]
pub struct AnonymousPlantingInput {
    pub user_name: Option<RawText>,
}

#[derive(Debug, Validate)]
struct TallyFields {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    user_name: Option<String>,
}

impl AnonymousPlantingInput {
    /// Trim and validate, returning the display name for the tally.
    pub fn into_user_name(self) -> Result<String, CoreError> {
        let mut errors = FieldErrors::new();
        let mut fields = TallyFields {
            user_name: coerce_text("user_name", self.user_name, &mut errors),
        };
        trim_field(&mut fields.user_name);
        validate_into(&fields, errors)?;
        Ok(fields.user_name.unwrap_or_default())
    }
}
