use thiserror::Error;

/// Generic notice shown when extraction fails without a usable message.
pub const EXTRACTION_FAILED: &str = "Failed to extract recipe. Please try again.";

/// Generic notice shown when the recipe could not be saved.
pub const PERSISTENCE_FAILED: &str = "Failed to create recipe. Please try again.";

/// A required piece of input is missing. Display strings are user-facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a recipe name")]
    MissingName,

    #[error("Please add at least one ingredient")]
    NoIngredients,

    #[error("No input provided. Paste recipe text or choose an image first")]
    NoInput,
}

/// A staged image was rejected. Nothing is staged when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported image format: {0}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedFormat(String),

    #[error("Failed to read image: {0}")]
    Unreadable(String),
}

/// Failure talking to one of the backend collaborators.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}{}", suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Mock backend: {0}")]
    Mock(String),
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl BackendError {
    /// Message the backend itself supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Errors produced by the capture workflow. Every variant is recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Please wait while loading your space")]
    SpaceNotReady,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Persistence(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl CaptureError {
    /// Build an extraction error, preferring the backend's own message.
    pub fn extraction(err: &BackendError) -> Self {
        let message = err
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(EXTRACTION_FAILED);
        CaptureError::Extraction(message.to_string())
    }

    /// Persistence failures always surface the generic notice.
    pub fn persistence() -> Self {
        CaptureError::Persistence(PERSISTENCE_FAILED.to_string())
    }

    /// The user-visible notice text for this error.
    pub fn notice(&self) -> String {
        self.to_string()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL in {var}: {message}")]
    InvalidUrl { var: String, message: String },

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prefers_server_message() {
        let err = BackendError::Status {
            status: 422,
            message: Some("Could not find a recipe in that text".to_string()),
        };
        assert_eq!(
            CaptureError::extraction(&err).notice(),
            "Could not find a recipe in that text"
        );
    }

    #[test]
    fn test_extraction_falls_back_to_generic() {
        let err = BackendError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(CaptureError::extraction(&err).notice(), EXTRACTION_FAILED);

        let err = BackendError::Parse("expected value".to_string());
        assert_eq!(CaptureError::extraction(&err).notice(), EXTRACTION_FAILED);

        let err = BackendError::Status {
            status: 400,
            message: Some("   ".to_string()),
        };
        assert_eq!(CaptureError::extraction(&err).notice(), EXTRACTION_FAILED);
    }

    #[test]
    fn test_validation_notices() {
        assert_eq!(
            CaptureError::from(ValidationError::MissingName).notice(),
            "Please enter a recipe name"
        );
        assert_eq!(
            CaptureError::SpaceNotReady.notice(),
            "Please wait while loading your space"
        );
    }

    #[test]
    fn test_status_display() {
        let err = BackendError::Status {
            status: 502,
            message: Some("upstream down".to_string()),
        };
        assert_eq!(err.to_string(), "Backend returned 502: upstream down");

        let err = BackendError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend returned 404");
    }
}
