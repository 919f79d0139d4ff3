//! In-memory backend for tests.
//!
//! Responses are configured up front; every call is recorded so tests can
//! assert on exactly what the workflow sent.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::Backend;
use crate::error::BackendError;
use crate::types::{CreateRecipeRequest, ExtractRequest, ExtractResponse, Space};

/// Canned outcome for one kind of call.
#[derive(Debug, Clone)]
pub enum MockResponse<T> {
    Ok(T),
    /// Non-success HTTP status with an optional `error` body message.
    Status { status: u16, message: Option<String> },
    /// Transport-level failure.
    Error(String),
}

impl<T: Clone> MockResponse<T> {
    fn to_result(&self) -> Result<T, BackendError> {
        match self {
            MockResponse::Ok(value) => Ok(value.clone()),
            MockResponse::Status { status, message } => Err(BackendError::Status {
                status: *status,
                message: message.clone(),
            }),
            MockResponse::Error(e) => Err(BackendError::Mock(e.clone())),
        }
    }
}

/// A call the workflow made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListSpaces,
    Extract(ExtractRequest),
    Create(CreateRecipeRequest),
}

/// Mock backend for testing.
pub struct MockBackend {
    spaces: MockResponse<Vec<Space>>,
    extraction: MockResponse<ExtractResponse>,
    create: MockResponse<()>,
    /// Artificial latency applied to every call.
    delay: Option<Duration>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    /// No spaces, no extraction configured, creation succeeds.
    pub fn new() -> Self {
        Self {
            spaces: MockResponse::Ok(vec![]),
            extraction: MockResponse::Error("No mock extraction configured".to_string()),
            create: MockResponse::Ok(()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_spaces(mut self, spaces: MockResponse<Vec<Space>>) -> Self {
        self.spaces = spaces;
        self
    }

    /// Shorthand for a listing containing the given ids in order.
    pub fn with_space_ids(self, ids: &[&str]) -> Self {
        let spaces = ids
            .iter()
            .map(|id| Space {
                id: crate::types::SpaceId::new(*id),
                name: None,
            })
            .collect();
        self.with_spaces(MockResponse::Ok(spaces))
    }

    pub fn with_extraction(mut self, extraction: MockResponse<ExtractResponse>) -> Self {
        self.extraction = extraction;
        self
    }

    /// Configure extraction from a raw JSON body, as the service would send it.
    pub fn with_extraction_json(self, body: &str) -> Result<Self, serde_json::Error> {
        let response: ExtractResponse = serde_json::from_str(body)?;
        Ok(self.with_extraction(MockResponse::Ok(response)))
    }

    pub fn with_create(mut self, create: MockResponse<()>) -> Self {
        self.create = create;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    /// Creation payloads sent so far.
    pub fn created(&self) -> Vec<CreateRecipeRequest> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Create(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn record(&self, call: RecordedCall) {
        self.lock_calls().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn list_spaces(&self) -> Result<Vec<Space>, BackendError> {
        self.record(RecordedCall::ListSpaces).await;
        self.spaces.to_result()
    }

    async fn extract_recipe(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError> {
        self.record(RecordedCall::Extract(request.clone())).await;
        self.extraction.to_result()
    }

    async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<(), BackendError> {
        self.record(RecordedCall::Create(request.clone())).await;
        self.create.to_result()
    }
}
