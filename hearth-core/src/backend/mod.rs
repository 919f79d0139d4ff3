//! Backend collaborators the capture workflow talks to.
//!
//! All outgoing requests go through the [`Backend`] trait so the workflow can
//! run against [`HttpBackend`] in production and [`MockBackend`] in tests.

mod http;
mod mock;

pub use http::{HttpBackend, HttpBackendBuilder};
pub use mock::{MockBackend, MockResponse, RecordedCall};

use async_trait::async_trait;

use crate::error::BackendError;
use crate::types::{CreateRecipeRequest, ExtractRequest, ExtractResponse, Space};

/// Path of the workspace listing endpoint.
pub const SPACES_PATH: &str = "/api/spaces";

/// Path of the AI recipe extraction endpoint.
pub const EXTRACT_PATH: &str = "/api/ai/parse-recipe";

/// Path of the recipe creation endpoint.
pub const RECIPES_PATH: &str = "/api/recipes";

#[async_trait]
pub trait Backend: Send + Sync {
    /// List the user's workspaces.
    async fn list_spaces(&self) -> Result<Vec<Space>, BackendError>;

    /// Convert raw text and/or an image into structured recipe fields.
    async fn extract_recipe(&self, request: &ExtractRequest)
        -> Result<ExtractResponse, BackendError>;

    /// Persist a finished recipe.
    async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<(), BackendError>;
}
