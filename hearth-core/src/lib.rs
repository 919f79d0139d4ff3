pub mod backend;
pub mod config;
pub mod draft;
pub mod error;
pub mod extract;
pub mod image;
pub mod merge;
pub mod mode;
pub mod session;
pub mod space;
pub mod staged;
pub mod submit;
pub mod types;

pub use backend::{Backend, HttpBackend, HttpBackendBuilder, MockBackend, MockResponse};
pub use config::BackendConfig;
pub use draft::{Draft, DraftField, DraftStore, IngredientField};
pub use error::{BackendError, CaptureError, ConfigError, StageError, ValidationError};
pub use merge::merge_extracted;
pub use mode::{InputMode, InputModeController};
pub use session::{CaptureSession, Navigation, Notice};
pub use space::SpaceState;
pub use staged::{StagedImage, StagedInput, Staging};
pub use submit::build_payload;
pub use types::{
    CreateRecipeRequest, Difficulty, ExtractRequest, ExtractResponse, ExtractedRecipe, Ingredient,
    Space, SpaceId,
};
