use serde::{Deserialize, Serialize};

use crate::models::placeholder::Placeholder;
use crate::models::text::TextContent;

/// The type of a shape. The layout engine only emits text boxes; the other
/// variants round-trip from loaded decks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    /// The shape type is unspecified.
    TypeUnspecified,
    /// Text box shape.
    TextBox,
    /// Rectangle shape.
    Rectangle,
    /// Round corner rectangle shape.
    RoundRectangle,
    /// Ellipse shape.
    Ellipse,
    /// Custom shape.
    Custom,
}

/// A PageElement kind representing a generic shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The type of the shape.
    pub shape_type: Option<ShapeType>,

    /// The text content of the shape.
    pub text: Option<TextContent>,

    /// The placeholder information for the shape, set on title slide shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
}
