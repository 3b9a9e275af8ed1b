// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::OptionalColor;
use crate::models::common::Dimension;
use crate::models::link::Link;

/// Represents the styling that can be applied to a TextRun.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// The foreground color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,

    /// The font family of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// The size of the text's font, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    /// The hyperlink destination of the text. If unset, there is no link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// The text alignment for a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Alignment is unspecified or inherited from the parent.
    AlignmentUnspecified,
    /// Aligned to the start of the line.
    Start,
    /// Centered.
    Center,
    /// Aligned to the end of the line.
    End,
    /// Text is stretched to fill the line (justified).
    Justified,
}

/// Styles that apply to a whole paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// The amount of indentation for the start of the first line of the paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_first_line: Option<Dimension>,

    /// The amount of indentation on the start side of the paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<Dimension>,

    /// Space between lines, as a percentage of normal (100.0 corresponds to 100%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
}
