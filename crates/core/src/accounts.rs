//! Account registration and login input rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{coerce_text, not_blank, trim_field, validate_into, FieldErrors, RawText};

/// The single message returned for every failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Letters, digits and `@ . + - _`.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// Request body for account registration.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterInput {
    pub username: Option<RawText>,
    pub email: Option<RawText>,
    pub password: Option<RawText>,
    pub profile_picture: Option<RawText>,
}

#[derive(Debug, Validate)]
struct RegistrationFields {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        regex(
            path = *USERNAME_RE,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    username: Option<String>,

    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    email: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(
            min = 8,
            message = "This password is too short. It must contain at least 8 characters."
        )
    )]
    password: Option<String>,

    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    profile_picture: Option<String>,
}

/// A validated registration request. The password is still plaintext.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
}

impl RegisterInput {
    pub fn into_registration(self) -> Result<Registration, CoreError> {
        let mut errors = FieldErrors::new();
        let mut fields = RegistrationFields {
            username: coerce_text("username", self.username, &mut errors),
            email: coerce_text("email", self.email, &mut errors),
            password: coerce_text("password", self.password, &mut errors),
            profile_picture: coerce_text("profile_picture", self.profile_picture, &mut errors),
        };
        trim_field(&mut fields.username);
        trim_field(&mut fields.email);
        trim_field(&mut fields.profile_picture);
        if fields.profile_picture.as_deref() == Some("") {
            fields.profile_picture = None;
        }

        validate_into(&fields, errors)?;

        Ok(Registration {
            username: fields.username.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            password: fields.password.unwrap_or_default(),
            profile_picture: fields.profile_picture,
        })
    }
}

/// Request body for login. Missing fields simply fail authentication.
#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginInput {
    /// Both credentials, or `None` when either is missing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}
