//! The recipe capture page: one session owns the draft, the input mode, the
//! staged input and the space lookup, and turns every failure into a notice.
//!
//! Every suspending operation races its request against the session's
//! cancellation token. Once [`CaptureSession::dismiss`] is called (or a
//! submission succeeds and the page navigates away) late responses are
//! dropped without touching state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::backend::Backend;
use crate::draft::{Draft, DraftStore};
use crate::error::CaptureError;
use crate::extract::extract_recipe;
use crate::merge::merge_extracted;
use crate::mode::{InputMode, InputModeController};
use crate::space::{resolve_space, SpaceState};
use crate::staged::{StagedImage, Staging};
use crate::submit::{build_payload, persist};
use crate::types::CreateRecipeRequest;

/// Route of the recipe listing, shown after a successful save.
pub const RECIPE_LIST_ROUTE: &str = "/recipes";

pub const EXTRACTED_NOTICE: &str = "Recipe extracted! Review the details and save when ready.";
pub const CREATED_NOTICE: &str = "Recipe created successfully!";

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    RecipeList,
}

impl Navigation {
    pub fn route(&self) -> &'static str {
        match self {
            Navigation::RecipeList => RECIPE_LIST_ROUTE,
        }
    }
}

pub struct CaptureSession {
    backend: Arc<dyn Backend>,
    store: DraftStore,
    mode: InputModeController,
    staging: Staging,
    space: SpaceState,
    space_requested: bool,
    cancel: CancellationToken,
    notices: Vec<Notice>,
    navigation: Option<Navigation>,
}

impl CaptureSession {
    /// A fresh session with an empty draft, in manual mode.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            store: DraftStore::new(),
            mode: InputModeController::new(),
            staging: Staging::new(),
            space: SpaceState::Loading,
            space_requested: false,
            cancel: CancellationToken::new(),
            notices: Vec::new(),
            navigation: None,
        }
    }

    /// Resolve the active space. Only the first call issues a request.
    pub async fn mount(&mut self) -> &SpaceState {
        if self.space_requested || self.is_dismissed() {
            return &self.space;
        }
        self.space_requested = true;

        let backend = Arc::clone(&self.backend);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("session dismissed before space resolved");
            }
            state = resolve_space(backend.as_ref()) => {
                self.space = state;
            }
        }
        &self.space
    }

    /// Token that dismisses this session when cancelled. Safe to hand to another task.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn dismiss(&self) {
        self.cancel.cancel();
    }

    pub fn is_dismissed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn draft(&self) -> &Draft {
        self.store.draft()
    }

    /// Direct field editing for the manual path.
    pub fn store_mut(&mut self) -> &mut DraftStore {
        &mut self.store
    }

    pub fn mode(&self) -> InputMode {
        self.mode.mode()
    }

    pub fn switch_mode(&mut self, mode: InputMode) {
        self.mode.switch_to(mode);
    }

    pub fn space(&self) -> &SpaceState {
        &self.space
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn stage_text(&mut self, text: impl Into<String>) {
        self.staging.stage_text(text);
    }

    /// Stage an image; a rejected image is reported and nothing changes.
    pub fn stage_image(&mut self, data: Vec<u8>) -> Result<(), CaptureError> {
        match self.staging.stage_image(data) {
            Ok(image) => {
                tracing::debug!(
                    content_type = %image.content_type,
                    bytes = image.data.len(),
                    "image staged"
                );
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    pub fn staged_image(&self) -> Option<&StagedImage> {
        self.staging.input().and_then(|input| input.image())
    }

    pub fn remove_staged_text(&mut self) {
        self.staging.remove_text();
    }

    pub fn remove_staged_image(&mut self) {
        self.staging.remove_image();
    }

    /// Whether the extract control should be enabled.
    pub fn can_extract(&self) -> bool {
        self.mode() == InputMode::AiAssisted && !self.staging.is_empty() && !self.is_dismissed()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.space.is_ready() && !self.is_dismissed()
    }

    /// Run extraction over the staged input and merge the result into the draft.
    ///
    /// On success the staged input is cleared and the mode returns to manual.
    /// On failure the draft, staging and mode are left as they were.
    pub async fn extract(&mut self) -> Result<(), CaptureError> {
        if self.is_dismissed() {
            return Err(CaptureError::Cancelled);
        }

        let backend = Arc::clone(&self.backend);
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CaptureError::Cancelled),
            result = extract_recipe(backend.as_ref(), self.staging.input()) => result,
        };

        match result {
            Ok(recipe) => {
                let merged = merge_extracted(self.store.draft(), &recipe);
                self.store.replace_all(merged);
                self.staging.clear();
                self.mode.extraction_succeeded();
                self.notices.push(Notice::Success(EXTRACTED_NOTICE.to_string()));
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Validate the draft and persist it.
    ///
    /// On success the draft is discarded, navigation to the recipe list is
    /// requested and the session is closed. On failure the draft is kept for retry.
    pub async fn submit(&mut self) -> Result<CreateRecipeRequest, CaptureError> {
        if self.is_dismissed() {
            return Err(CaptureError::Cancelled);
        }

        let payload = match build_payload(&self.space, self.store.draft()) {
            Ok(payload) => payload,
            Err(e) => return Err(self.report(e)),
        };

        let backend = Arc::clone(&self.backend);
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CaptureError::Cancelled),
            result = persist(backend.as_ref(), &payload) => result,
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    name = %payload.name,
                    space_id = %payload.space_id,
                    "recipe created"
                );
                self.notices.push(Notice::Success(CREATED_NOTICE.to_string()));
                self.navigation = Some(Navigation::RecipeList);
                self.store = DraftStore::new();
                self.cancel.cancel();
                Ok(payload)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Navigation requested by the session, if any.
    pub fn navigation(&self) -> Option<Navigation> {
        self.navigation
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Record an error as a notice. Cancellation is silent: nobody is watching.
    fn report(&mut self, err: CaptureError) -> CaptureError {
        if err == CaptureError::Cancelled {
            tracing::debug!("operation cancelled; dropping result");
        } else {
            self.notices.push(Notice::Error(err.notice()));
        }
        err
    }
}
