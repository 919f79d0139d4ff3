//! Mapping from an extraction result onto an editable draft.
//!
//! Kept free of store mutation so the policy can be checked on its own.

use serde_json::Value;

use crate::draft::Draft;
use crate::types::{Difficulty, ExtractedRecipe};

/// Separator used when joining extracted tags into the editable field.
pub const TAG_SEPARATOR: &str = ", ";

/// Build the draft that results from applying `recipe` over `current`.
///
/// Text fields the service returns are replaced, absent ones become empty.
/// Ingredients are replaced only when the service returned at least one;
/// otherwise the current rows survive. `image_url` is never returned by the
/// service and is carried over unchanged.
pub fn merge_extracted(current: &Draft, recipe: &ExtractedRecipe) -> Draft {
    let ingredients = match &recipe.ingredients {
        Some(rows) if !rows.is_empty() => rows.clone(),
        _ => current.ingredients.clone(),
    };

    Draft {
        name: recipe.name.clone().unwrap_or_default(),
        description: recipe.description.clone().unwrap_or_default(),
        ingredients,
        instructions: recipe.instructions.clone().unwrap_or_default(),
        prep_time: numeric_display(recipe.prep_time.as_ref()),
        cook_time: numeric_display(recipe.cook_time.as_ref()),
        servings: numeric_display(recipe.servings.as_ref()),
        difficulty: recipe.difficulty.as_deref().and_then(Difficulty::parse),
        cuisine_type: recipe.cuisine_type.clone().unwrap_or_default(),
        image_url: current.image_url.clone(),
        tags: recipe
            .tags
            .as_ref()
            .map(|tags| tags.join(TAG_SEPARATOR))
            .unwrap_or_default(),
    }
}

/// Render a numeric value into its editable form, or empty if it is not numeric.
///
/// Whatever is rendered here parses back to the same value in the payload.
pub fn numeric_display(value: Option<&Value>) -> String {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite())
                // Truncate toward zero; 12.7 minutes displays as 12.
                .map(f64::trunc)
                .filter(|v| *v >= i64::MIN as f64 && *v < i64::MAX as f64)
                .map(|v| v as i64)
        }),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };
    parsed.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse an optionally signed leading run of ASCII digits after trimming
/// ("25 min" -> 25, "-3" -> -3). None when there are no digits or the value
/// does not fit.
pub fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    let sign_len = usize::from(s.starts_with('-') || s.starts_with('+'));
    let end = s
        .char_indices()
        .skip(sign_len)
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    // Safe: end is on an ASCII boundary
    #[allow(clippy::string_slice)]
    let number = &s[..end];
    number.parse().ok()
}
