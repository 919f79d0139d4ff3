//! AI-assisted extraction of a recipe from staged text and/or image.

use crate::backend::Backend;
use crate::error::{CaptureError, ValidationError};
use crate::staged::StagedInput;
use crate::types::ExtractedRecipe;

/// Send staged input to the extraction service.
///
/// Fails with [`ValidationError::NoInput`] before any network call when
/// nothing is staged. Service failures become [`CaptureError::Extraction`]
/// carrying the service's own message when it sent one.
pub async fn extract_recipe(
    backend: &dyn Backend,
    staged: Option<&StagedInput>,
) -> Result<ExtractedRecipe, CaptureError> {
    let staged = staged.ok_or(ValidationError::NoInput)?;
    let request = staged.to_request();

    match backend.extract_recipe(&request).await {
        Ok(response) => {
            tracing::info!(
                name = response.recipe.name.as_deref().unwrap_or(""),
                ingredients = response.recipe.ingredients.as_ref().map_or(0, Vec::len),
                "recipe extracted"
            );
            Ok(response.recipe)
        }
        Err(e) => {
            tracing::warn!(error = %e, "recipe extraction failed");
            Err(CaptureError::extraction(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, MockResponse, RecordedCall};
    use crate::error::EXTRACTION_FAILED;

    #[tokio::test]
    async fn test_no_input_makes_no_call() {
        let backend = MockBackend::new();
        let result = extract_recipe(&backend, None).await;
        assert_eq!(
            result,
            Err(CaptureError::Validation(ValidationError::NoInput))
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sends_text() {
        let backend = MockBackend::new()
            .with_extraction_json(r#"{"recipe": {"name": "Pasta Dinner"}}"#)
            .unwrap();
        let staged = StagedInput::Text("dinner pasta recipe".to_string());
        let recipe = extract_recipe(&backend, Some(&staged)).await.unwrap();
        assert_eq!(recipe.name.as_deref(), Some("Pasta Dinner"));

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        let RecordedCall::Extract(request) = &calls[0] else {
            panic!("expected extract call, got {:?}", calls[0]);
        };
        assert_eq!(request.text.as_deref(), Some("dinner pasta recipe"));
        assert_eq!(request.image_base64, None);
    }

    #[tokio::test]
    async fn test_service_message_surfaces() {
        let backend = MockBackend::new().with_extraction(MockResponse::Status {
            status: 422,
            message: Some("No recipe found in the provided text".to_string()),
        });
        let staged = StagedInput::Text("hello".to_string());
        assert_eq!(
            extract_recipe(&backend, Some(&staged)).await,
            Err(CaptureError::Extraction(
                "No recipe found in the provided text".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let backend =
            MockBackend::new().with_extraction(MockResponse::Error("timed out".to_string()));
        let staged = StagedInput::Text("hello".to_string());
        assert_eq!(
            extract_recipe(&backend, Some(&staged)).await,
            Err(CaptureError::Extraction(EXTRACTION_FAILED.to_string()))
        );
    }
}
