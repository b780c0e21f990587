// Imports
use crate::render::ImageSource;

/// The content drawn centered on the filled shape.
///
/// Exactly one variant is active per built drawable.
#[derive(Debug, Clone)]
pub enum Content {
    /// A text string, drawn with the text paint.
    Text(String),
    /// An image, drawn by pixel dimensions without scaling.
    Image(ImageSource),
}

impl Content {
    /// Whether the content is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Whether the content is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    /// The text, when the content is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ImageSource> for Content {
    fn from(source: ImageSource) -> Self {
        Self::Image(source)
    }
}
