//! The editable recipe draft and its mutation operations.
//!
//! Fields are held in their editable (string) form. Nothing here validates;
//! validation happens once, at submission.

use crate::types::{Difficulty, Ingredient};

/// The in-progress, unsaved recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    /// Never empty while editing.
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub difficulty: Option<Difficulty>,
    pub cuisine_type: String,
    pub image_url: String,
    /// Comma-separated tag list as typed.
    pub tags: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            ingredients: vec![Ingredient::default()],
            instructions: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            servings: String::new(),
            difficulty: None,
            cuisine_type: String::new(),
            image_url: String::new(),
            tags: String::new(),
        }
    }
}

/// Scalar text fields of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    Instructions,
    PrepTime,
    CookTime,
    Servings,
    CuisineType,
    ImageUrl,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Amount,
    Unit,
}

/// Owns the draft for one capture session.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    draft: Draft,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            DraftField::Name => &mut self.draft.name,
            DraftField::Description => &mut self.draft.description,
            DraftField::Instructions => &mut self.draft.instructions,
            DraftField::PrepTime => &mut self.draft.prep_time,
            DraftField::CookTime => &mut self.draft.cook_time,
            DraftField::Servings => &mut self.draft.servings,
            DraftField::CuisineType => &mut self.draft.cuisine_type,
            DraftField::ImageUrl => &mut self.draft.image_url,
            DraftField::Tags => &mut self.draft.tags,
        };
        *slot = value;
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.draft.difficulty = difficulty;
    }

    pub fn add_ingredient_row(&mut self) {
        self.draft.ingredients.push(Ingredient::default());
    }

    /// Remove the row at `index`. Removing the last remaining row, or an index
    /// out of range, is a no-op. Returns whether a row was removed.
    pub fn remove_ingredient_row(&mut self, index: usize) -> bool {
        if self.draft.ingredients.len() <= 1 || index >= self.draft.ingredients.len() {
            return false;
        }
        self.draft.ingredients.remove(index);
        true
    }

    /// Update one attribute of one row in place. Returns false if `index` is out of range.
    pub fn update_ingredient_field(
        &mut self,
        index: usize,
        field: IngredientField,
        value: impl Into<String>,
    ) -> bool {
        let Some(row) = self.draft.ingredients.get_mut(index) else {
            return false;
        };
        let value = value.into();
        match field {
            IngredientField::Name => row.name = value,
            IngredientField::Amount => row.amount = value,
            IngredientField::Unit => row.unit = value,
        }
        true
    }

    /// Overwrite the whole draft. An empty ingredient list is replaced with a
    /// single blank row so the editing floor still holds.
    pub fn replace_all(&mut self, mut draft: Draft) {
        if draft.ingredients.is_empty() {
            draft.ingredients.push(Ingredient::default());
        }
        self.draft = draft;
    }
}
