//! One-shot lookup of the user's active space.

use crate::backend::Backend;
use crate::types::SpaceId;

/// Progress of the space lookup for a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpaceState {
    #[default]
    Loading,
    Ready(SpaceId),
    /// The lookup failed or the user has no spaces. Not retried.
    Failed,
}

impl SpaceState {
    pub fn space_id(&self) -> Option<&SpaceId> {
        match self {
            SpaceState::Ready(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SpaceState::Ready(_))
    }
}

/// List the user's spaces and take the first one.
///
/// Errors are logged and swallowed: the caller only learns that no space is
/// available, which later blocks submission.
pub async fn resolve_space(backend: &dyn Backend) -> SpaceState {
    match backend.list_spaces().await {
        Ok(spaces) => match spaces.into_iter().next() {
            Some(space) => {
                tracing::debug!(space_id = %space.id, "space resolved");
                SpaceState::Ready(space.id)
            }
            None => {
                tracing::warn!("user has no spaces; recipe submission will be blocked");
                SpaceState::Failed
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to load spaces");
            SpaceState::Failed
        }
    }
}
