// src/models/text_element.rs

use serde::{Deserialize, Serialize};

use crate::models::properties::{ParagraphStyle, TextStyle};

/// Represents a segment of text with consistent styling within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text content of this run.
    pub content: Option<String>,
    /// The styling applied to this run.
    pub style: Option<TextStyle>,
}

/// Marks the beginning of a new paragraph in the text element stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMarker {
    /// The paragraph's style.
    pub style: Option<ParagraphStyle>,
}

/// The payload of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextElementKind {
    /// A run of text with consistent styling.
    TextRun(TextRun),
    /// A marker indicating the beginning of a paragraph and its properties.
    ParagraphMarker(ParagraphMarker),
}

/// A single logical element in the text stream of a Shape or TableCell.
/// Indices are zero-based UTF-16 offsets into the shape's text, end exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<i32>,
    #[serde(flatten)]
    pub kind: TextElementKind,
}
