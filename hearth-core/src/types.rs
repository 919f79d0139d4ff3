use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of the user's active workspace (household).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the workspace listing. Only `id` is used; other fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Space {
    pub id: SpaceId,
    /// Display name, kept raw; listings do not agree on its shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<serde_json::Value>,
}

impl Space {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] =
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ingredient row. All three parts are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub unit: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }
}

/// Body sent to the recipe extraction service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `data:<mime>;base64,<payload>` form of the staged image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// Successful response from the extraction service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractResponse {
    pub recipe: ExtractedRecipe,
}

/// Recipe fields as returned by the extraction service. Every field may be absent.
///
/// Numeric fields are kept as raw JSON because the service returns numbers and
/// strings interchangeably ("10", 10, "10 minutes").
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtractedRecipe {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub prep_time: Option<serde_json::Value>,
    #[serde(default)]
    pub cook_time: Option<serde_json::Value>,
    #[serde(default)]
    pub servings: Option<serde_json::Value>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
}

/// Body sent to the recipe persistence service. Empty fields are omitted, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    pub space_id: SpaceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Error body returned by the backend on non-success responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Accept either a JSON string or a JSON number and keep it as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_listing_tolerates_odd_names() {
        let listing = r#"[
            {"id": "s1", "name": {"en": "Home"}},
            {"id": "s2", "name": "Cabin"},
            {"id": "s3"}
        ]"#;
        let spaces: Vec<Space> = serde_json::from_str(listing).unwrap();
        assert_eq!(spaces[0].id, SpaceId::new("s1"));
        assert_eq!(spaces[0].name(), None);
        assert_eq!(spaces[1].name(), Some("Cabin"));
        assert_eq!(spaces[2].name(), None);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("Easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("moderate"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn test_ingredient_amount_accepts_numbers() {
        let ingredient: Ingredient =
            serde_json::from_str(r#"{"name": "eggs", "amount": 3, "unit": null}"#).unwrap();
        assert_eq!(ingredient, Ingredient::new("eggs", "3", ""));

        let ingredient: Ingredient = serde_json::from_str(r#"{"name": "salt"}"#).unwrap();
        assert_eq!(ingredient, Ingredient::new("salt", "", ""));
    }

    #[test]
    fn test_extract_request_uses_camel_case() {
        let request = ExtractRequest {
            text: None,
            image_base64: Some("data:image/png;base64,AAAA".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"imageBase64": "data:image/png;base64,AAAA"})
        );
    }

    #[test]
    fn test_extracted_recipe_all_absent() {
        let response: ExtractResponse = serde_json::from_str(r#"{"recipe": {}}"#).unwrap();
        assert_eq!(response.recipe, ExtractedRecipe::default());
    }

    #[test]
    fn test_create_request_omits_empty_fields() {
        let request = CreateRecipeRequest {
            space_id: SpaceId::new("space-1"),
            name: "Toast".to_string(),
            description: None,
            ingredients: vec![Ingredient::new("bread", "1", "slice")],
            instructions: None,
            prep_time: Some(2),
            cook_time: None,
            servings: None,
            difficulty: Some(Difficulty::Easy),
            cuisine_type: None,
            image_url: None,
            tags: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "space_id": "space-1",
                "name": "Toast",
                "ingredients": [{"name": "bread", "amount": "1", "unit": "slice"}],
                "prep_time": 2,
                "difficulty": "easy"
            })
        );
    }
}
