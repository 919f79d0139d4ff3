//! Validation and persistence of a finished draft.

use crate::backend::Backend;
use crate::draft::Draft;
use crate::error::{CaptureError, ValidationError};
use crate::merge::leading_integer;
use crate::space::SpaceState;
use crate::types::{CreateRecipeRequest, Ingredient};

/// Check preconditions in order and build the creation payload.
///
/// The first failing check wins: space, then name, then ingredients.
pub fn build_payload(
    space: &SpaceState,
    draft: &Draft,
) -> Result<CreateRecipeRequest, CaptureError> {
    let space_id = space.space_id().ok_or(CaptureError::SpaceNotReady)?;

    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName.into());
    }

    let ingredients: Vec<Ingredient> = draft
        .ingredients
        .iter()
        .filter(|row| !row.name.trim().is_empty())
        .map(|row| Ingredient::new(row.name.trim(), row.amount.trim(), row.unit.trim()))
        .collect();
    if ingredients.is_empty() {
        return Err(ValidationError::NoIngredients.into());
    }

    Ok(CreateRecipeRequest {
        space_id: space_id.clone(),
        name: name.to_string(),
        description: non_empty(&draft.description),
        ingredients,
        instructions: non_empty(&draft.instructions),
        prep_time: leading_integer(&draft.prep_time),
        cook_time: leading_integer(&draft.cook_time),
        servings: leading_integer(&draft.servings),
        difficulty: draft.difficulty,
        cuisine_type: non_empty(&draft.cuisine_type),
        image_url: non_empty(&draft.image_url),
        tags: split_tags(&draft.tags),
    })
}

/// Split the comma-separated tag field. None when no tag survives trimming.
pub fn split_tags(raw: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    (!tags.is_empty()).then_some(tags)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Send the payload to the persistence service.
pub async fn persist(
    backend: &dyn Backend,
    payload: &CreateRecipeRequest,
) -> Result<(), CaptureError> {
    backend.create_recipe(payload).await.map_err(|e| {
        tracing::error!(error = %e, space_id = %payload.space_id, "failed to create recipe");
        CaptureError::persistence()
    })
}
