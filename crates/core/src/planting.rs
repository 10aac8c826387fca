//! Planting request validation and forest placement.

use rand::Rng;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::species::TreeSpecies;
use crate::validation::{coerce_text, not_blank, trim_field, validate_into, FieldErrors, RawText};

/// Maximum length of planter and tree names.
pub const MAX_NAME_LENGTH: u64 = 100;

/// Trees are scattered over the square `[-FOREST_HALF_EXTENT, FOREST_HALF_EXTENT]`
/// on the X/Z plane.
pub const FOREST_HALF_EXTENT: f64 = 8.0;

/// Request body for planting a tree.
///
/// Every field is optional and loosely typed at the serde level so that
/// missing or mistyped values come back as field errors rather than a body
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PlantTreeInput {
    pub user_name: Option<RawText>,
    pub tree_name: Option<RawText>,
    /// Species tag; absent means [`TreeSpecies::default`].
    pub tree_type: Option<RawText>,
}

#[derive(Debug, Validate)]
struct PlantingFields {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    user_name: Option<String>,

    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    tree_name: Option<String>,
}

/// A validated planting request.
#[derive(Debug, Clone, PartialEq)]
pub struct Planting {
    pub planter_name: String,
    pub tree_name: String,
    pub species: TreeSpecies,
}

impl PlantTreeInput {
    /// Coerce, trim, validate and convert into a [`Planting`].
    ///
    /// All field errors are reported together, including an unknown species.
    /// An empty `tree_type` is an unknown species, not a request for the
    /// default.
    pub fn into_planting(self) -> Result<Planting, CoreError> {
        let mut errors = FieldErrors::new();
        let mut fields = PlantingFields {
            user_name: coerce_text("user_name", self.user_name, &mut errors),
            tree_name: coerce_text("tree_name", self.tree_name, &mut errors),
        };
        trim_field(&mut fields.user_name);
        trim_field(&mut fields.tree_name);

        let species = match coerce_text("tree_type", self.tree_type, &mut errors) {
            None => TreeSpecies::default(),
            Some(tag) => tag.parse::<TreeSpecies>().unwrap_or_else(|unknown| {
                errors.insert("tree_type".into(), vec![unknown.to_string()]);
                TreeSpecies::default()
            }),
        };

        validate_into(&fields, errors)?;

        Ok(Planting {
            planter_name: fields.user_name.unwrap_or_default(),
            tree_name: fields.tree_name.unwrap_or_default(),
            species,
        })
    }
}

/// A point in the 3D forest scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Pick a ground position for a new tree.
///
/// X and Z are uniform over the forest square; Y always stays at ground level.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position {
        x: rng.random_range(-FOREST_HALF_EXTENT..=FOREST_HALF_EXTENT),
        y: 0.0,
        z: rng.random_range(-FOREST_HALF_EXTENT..=FOREST_HALF_EXTENT),
    }
}
