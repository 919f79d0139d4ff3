//! End-to-end capture scenarios against the in-memory backend.

use std::sync::Arc;

use hearth_core::backend::RecordedCall;
use hearth_core::{
    CaptureError, CaptureSession, DraftField, Ingredient, IngredientField, InputMode, MockBackend,
    MockResponse, Navigation, Notice, SpaceId,
};
use serde_json::json;

fn mounted_backend() -> MockBackend {
    MockBackend::new().with_space_ids(&["space-1"])
}

#[tokio::test]
async fn manual_path_submits_minimal_payload() {
    let backend = Arc::new(mounted_backend());
    let mut session = CaptureSession::new(backend.clone());
    session.mount().await;

    session
        .store_mut()
        .set_field(DraftField::Name, "Grandma's Apple Pie");
    let store = session.store_mut();
    store.update_ingredient_field(0, IngredientField::Name, "flour");
    store.update_ingredient_field(0, IngredientField::Amount, "2");
    store.update_ingredient_field(0, IngredientField::Unit, "cups");

    session.submit().await.expect("submission should succeed");

    let created = backend.created();
    assert_eq!(created.len(), 1);
    assert_eq!(
        serde_json::to_value(&created[0]).unwrap(),
        json!({
            "space_id": "space-1",
            "name": "Grandma's Apple Pie",
            "ingredients": [{"name": "flour", "amount": "2", "unit": "cups"}]
        })
    );
    assert_eq!(session.navigation(), Some(Navigation::RecipeList));
    assert_eq!(session.navigation().unwrap().route(), "/recipes");
}

#[tokio::test]
async fn ai_path_merges_and_returns_to_manual() {
    let backend = Arc::new(
        mounted_backend()
            .with_extraction_json(
                r#"{"recipe": {
                    "name": "Pasta Dinner",
                    "ingredients": [{"name": "pasta", "amount": "1", "unit": "lb"}],
                    "prep_time": 10
                }}"#,
            )
            .unwrap(),
    );
    let mut session = CaptureSession::new(backend.clone());
    session.mount().await;

    session.switch_mode(InputMode::AiAssisted);
    session.stage_text("dinner pasta recipe");
    assert!(session.can_extract());

    session.extract().await.expect("extraction should succeed");

    let draft = session.draft();
    assert_eq!(draft.name, "Pasta Dinner");
    assert_eq!(draft.ingredients, vec![Ingredient::new("pasta", "1", "lb")]);
    assert_eq!(draft.prep_time, "10");
    assert_eq!(draft.cook_time, "");
    assert_eq!(session.mode(), InputMode::Manual);
    assert!(session.staging().is_empty());

    // The reviewed draft submits with the converted number.
    let payload = session.submit().await.unwrap();
    assert_eq!(payload.prep_time, Some(10));
    assert_eq!(payload.space_id, SpaceId::new("space-1"));

    let calls = backend.calls();
    assert!(matches!(calls[1], RecordedCall::Extract(_)));
    assert!(matches!(calls[2], RecordedCall::Create(_)));
}

#[tokio::test]
async fn space_error_wins_over_other_validation() {
    // Listing fails, name empty, no ingredients: only the space message shows.
    let backend = Arc::new(
        MockBackend::new().with_spaces(MockResponse::Status {
            status: 503,
            message: None,
        }),
    );
    let mut session = CaptureSession::new(backend);
    session.mount().await;

    let err = session.submit().await.unwrap_err();
    assert_eq!(err, CaptureError::SpaceNotReady);
    assert_eq!(
        session.take_notices(),
        vec![Notice::Error(
            "Please wait while loading your space".to_string()
        )]
    );
}

#[tokio::test]
async fn validation_messages_follow_priority() {
    let backend = Arc::new(mounted_backend());
    let mut session = CaptureSession::new(backend.clone());
    session.mount().await;

    session.submit().await.unwrap_err();
    session.store_mut().set_field(DraftField::Name, "Salad");
    session.submit().await.unwrap_err();

    let messages: Vec<String> = session
        .take_notices()
        .into_iter()
        .map(|n| n.message().to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Please enter a recipe name".to_string(),
            "Please add at least one ingredient".to_string()
        ]
    );
    assert!(backend.created().is_empty());
}

#[tokio::test]
async fn extraction_without_ingredients_keeps_manual_rows() {
    let extraction = r#"{"recipe": {"name": "Mystery Stew", "tags": ["winter", "soup"]}}"#;
    let backend = Arc::new(mounted_backend().with_extraction_json(extraction).unwrap());
    let mut session = CaptureSession::new(backend);
    session.mount().await;

    let store = session.store_mut();
    store.update_ingredient_field(0, IngredientField::Name, "beef");
    store.add_ingredient_row();
    store.update_ingredient_field(1, IngredientField::Name, "carrots");

    session.switch_mode(InputMode::AiAssisted);
    session.stage_text("a hearty stew");
    session.extract().await.unwrap();

    let names: Vec<&str> = session
        .draft()
        .ingredients
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["beef", "carrots"]);
    assert_eq!(session.draft().tags, "winter, soup");

    let payload = session.submit().await.unwrap();
    assert_eq!(
        payload.tags,
        Some(vec!["winter".to_string(), "soup".to_string()])
    );
}

#[tokio::test]
async fn tags_field_round_trip() {
    let backend = Arc::new(mounted_backend());
    let mut session = CaptureSession::new(backend);
    session.mount().await;

    let store = session.store_mut();
    store.set_field(DraftField::Name, "Fruitcake");
    store.update_ingredient_field(0, IngredientField::Name, "fruit");
    store.set_field(DraftField::Tags, "dessert, holiday, vegetarian");

    let payload = session.submit().await.unwrap();
    assert_eq!(
        payload.tags,
        Some(vec![
            "dessert".to_string(),
            "holiday".to_string(),
            "vegetarian".to_string()
        ])
    );
}

#[tokio::test]
async fn blank_tags_are_omitted() {
    let backend = Arc::new(mounted_backend());
    let mut session = CaptureSession::new(backend.clone());
    session.mount().await;

    let store = session.store_mut();
    store.set_field(DraftField::Name, "Plain Rice");
    store.update_ingredient_field(0, IngredientField::Name, "rice");
    store.set_field(DraftField::Tags, "   ");

    session.submit().await.unwrap();
    let json = serde_json::to_value(&backend.created()[0]).unwrap();
    assert!(json.get("tags").is_none());
}

#[tokio::test]
async fn persistence_failure_allows_retry() {
    let failing = Arc::new(mounted_backend().with_create(MockResponse::Error(
        "connection reset".to_string(),
    )));
    let mut session = CaptureSession::new(failing);
    session.mount().await;
    session.store_mut().set_field(DraftField::Name, "Bread");
    session
        .store_mut()
        .update_ingredient_field(0, IngredientField::Name, "flour");

    assert!(matches!(
        session.submit().await,
        Err(CaptureError::Persistence(_))
    ));
    assert!(session.can_submit());
    assert_eq!(session.draft().name, "Bread");

    // A second attempt sends the same draft again.
    assert!(session.submit().await.is_err());
    assert_eq!(session.take_notices().len(), 2);
}
