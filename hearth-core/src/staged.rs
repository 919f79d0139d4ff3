//! Raw input staged for AI-assisted extraction.

use crate::error::StageError;
use crate::image::{to_data_url, validate_image};
use crate::types::ExtractRequest;

/// An image the user selected, validated and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub data: Vec<u8>,
    pub content_type: String,
    /// `data:` URL used both for the preview and as the request payload.
    pub preview_data_url: String,
}

impl StagedImage {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, StageError> {
        let content_type = validate_image(&data)?;
        let preview_data_url = to_data_url(&content_type, &data);
        Ok(Self {
            data,
            content_type,
            preview_data_url,
        })
    }
}

/// What is staged for extraction. Absence of any input is `None` at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedInput {
    Text(String),
    Image(StagedImage),
    Both { text: String, image: StagedImage },
}

impl StagedInput {
    pub fn text(&self) -> Option<&str> {
        match self {
            StagedInput::Text(text) | StagedInput::Both { text, .. } => Some(text),
            StagedInput::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&StagedImage> {
        match self {
            StagedInput::Image(image) | StagedInput::Both { image, .. } => Some(image),
            StagedInput::Text(_) => None,
        }
    }

    pub fn to_request(&self) -> ExtractRequest {
        ExtractRequest {
            text: self.text().map(str::to_string),
            image_base64: self.image().map(|i| i.preview_data_url.clone()),
        }
    }

    fn from_parts(text: Option<String>, image: Option<StagedImage>) -> Option<Self> {
        match (text, image) {
            (Some(text), Some(image)) => Some(StagedInput::Both { text, image }),
            (Some(text), None) => Some(StagedInput::Text(text)),
            (None, Some(image)) => Some(StagedInput::Image(image)),
            (None, None) => None,
        }
    }
}

/// Holder for the staged input of one session.
#[derive(Debug, Clone, Default)]
pub struct Staging {
    input: Option<StagedInput>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> Option<&StagedInput> {
        self.input.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_none()
    }

    /// Stage pasted text. Blank text removes any staged text.
    pub fn stage_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        let image = self.take_image();
        self.input = StagedInput::from_parts(text, image);
    }

    /// Stage an image. On rejection the previous staging is left as it was.
    pub fn stage_image(&mut self, data: Vec<u8>) -> Result<&StagedImage, StageError> {
        let image = StagedImage::from_bytes(data)?;
        let text = self.take_text();
        self.input = StagedInput::from_parts(text, Some(image));
        self.input
            .as_ref()
            .and_then(StagedInput::image)
            .ok_or_else(|| StageError::Unreadable("image was not staged".to_string()))
    }

    pub fn remove_text(&mut self) {
        let image = self.take_image();
        self.input = StagedInput::from_parts(None, image);
    }

    pub fn remove_image(&mut self) {
        let text = self.take_text();
        self.input = StagedInput::from_parts(text, None);
    }

    pub fn clear(&mut self) {
        self.input = None;
    }

    fn take_text(&mut self) -> Option<String> {
        match self.input.take() {
            Some(StagedInput::Text(text)) => Some(text),
            Some(StagedInput::Both { text, .. }) => Some(text),
            _ => None,
        }
    }

    fn take_image(&mut self) -> Option<StagedImage> {
        match self.input.take() {
            Some(StagedInput::Image(image)) => Some(image),
            Some(StagedInput::Both { image, .. }) => Some(image),
            _ => None,
        }
    }
}
