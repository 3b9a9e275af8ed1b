use thiserror::Error;

use crate::document::DocumentError;

/// Represents errors that can occur while serving a layout action.
#[derive(Error, Debug)]
pub enum SlidesError {
    /// No presentation with this id is held and no file was supplied to load it from.
    #[error("Presentation '{0}' not found; supply its file to reload it")]
    PresentationNotFound(String),

    /// A slide index outside the presentation's slide range.
    #[error("Slide index {index} out of range: {}", valid_range(.count))]
    SlideIndexOutOfRange { index: usize, count: usize },

    /// An element index outside the slide's element range.
    #[error("Element index {index} out of range on slide {slide_index}: {}", valid_range(.count))]
    ElementIndexOutOfRange {
        slide_index: usize,
        index: usize,
        count: usize,
    },

    /// An error indicating invalid input was provided to an action.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encoding or decoding the presentation container failed.
    #[error("Failed to (de)serialize presentation: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The supplied file was not valid base64.
    #[error("Failed to decode input file: {0}")]
    FileDecode(#[from] base64::DecodeError),

    /// The shape library rejected an element.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// An I/O error occurred, e.g. while reading a layout configuration file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn valid_range(count: &usize) -> String {
    let count = *count;
    if count == 0 {
        "there are no valid indices".to_string()
    } else {
        format!("valid range is 0..={}", count - 1)
    }
}

/// A type alias for `Result<T, SlidesError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, SlidesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_include_the_valid_range() {
        let err = SlidesError::SlideIndexOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "Slide index 4 out of range: valid range is 0..=2");

        let err = SlidesError::ElementIndexOutOfRange {
            slide_index: 1,
            index: 0,
            count: 0,
        };
        assert!(err.to_string().contains("there are no valid indices"));
    }
}
