//! The serialized presentation handed back with every mutating action.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::presentation::Presentation;

pub const MIME_TYPE: &str = "application/vnd.slides-autolayout+json";
pub const FILE_EXTENSION: &str = ".slides.json";
const MAX_STEM_LEN: usize = 64;

/// A durable copy of a presentation, base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub content_base64: String,
}

/// A file name stem from a title: alphanumerics kept, runs of anything else
/// collapsed to `_`.
fn file_stem(title: Option<&str>) -> String {
    let mut stem = String::new();
    for c in title.unwrap_or_default().trim().chars() {
        if c.is_alphanumeric() || c == '-' {
            stem.push(c);
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
        if stem.chars().count() >= MAX_STEM_LEN {
            break;
        }
    }
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        "presentation".to_string()
    } else {
        stem.to_string()
    }
}

pub fn encode(presentation: &Presentation) -> Result<FileAttachment> {
    let bytes = serde_json::to_vec(presentation)?;
    Ok(FileAttachment {
        file_name: format!("{}{}", file_stem(presentation.title.as_deref()), FILE_EXTENSION),
        mime_type: MIME_TYPE.to_string(),
        content_base64: STANDARD.encode(bytes),
    })
}

pub fn decode(content_base64: &str) -> Result<Presentation> {
    let bytes = STANDARD.decode(content_base64.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}
