use serde::{Deserialize, Serialize};

/// A PageElement kind representing an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// An URL the image content can be fetched from, when it is hosted.
    pub content_url: Option<String>,

    /// The source URL is the URL used to insert the image. The source URL can be empty.
    pub source_url: Option<String>,
}
