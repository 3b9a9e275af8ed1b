use serde::{Deserialize, Serialize};

/// The type of placeholder a shape stands in for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceholderType {
    /// Default value, signifies it is not a placeholder.
    None,
    /// Body text placeholder.
    Body,
    /// Centered title placeholder.
    CenteredTitle,
    /// Subtitle placeholder.
    Subtitle,
    /// Title placeholder.
    Title,
}

/// The placeholder information that identifies a placeholder shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// The type of the placeholder.
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<PlaceholderType>,
    /// The index of the placeholder when several of one type share a page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

impl Placeholder {
    pub fn of(placeholder_type: PlaceholderType) -> Self {
        Self {
            placeholder_type: Some(placeholder_type),
            index: Some(0),
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(
            self.placeholder_type,
            Some(PlaceholderType::Title) | Some(PlaceholderType::CenteredTitle)
        )
    }
}
