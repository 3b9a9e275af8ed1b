// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::chart::Chart;
use crate::models::common::{AffineTransform, Size};
use crate::models::image::Image;
use crate::models::shape::Shape;
use crate::models::table::Table;
use crate::models::text::TextContent;
use crate::units::{emu_to_inches, Rect};

/// The specific kind of PageElement represented as an enum with associated data.
/// The JSON representation uses the field name as the key (e.g., "shape": {...}, "image": {...}).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageElementKind {
    /// A generic shape, usually a text box.
    Shape(Shape),
    /// An image page element.
    Image(Image),
    /// A table page element.
    Table(Table),
    /// A chart rendered from inline data.
    Chart(Chart),
}

impl PageElementKind {
    /// Short type tag used in element listings.
    pub fn type_name(&self) -> &'static str {
        match self {
            PageElementKind::Shape(_) => "shape",
            PageElementKind::Image(_) => "image",
            PageElementKind::Table(_) => "table",
            PageElementKind::Chart(_) => "chart",
        }
    }
}

/// A visual element rendered on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// The object ID for this page element.
    pub object_id: String,

    /// The size of the page element.
    pub size: Option<Size>,

    /// The transform of the page element.
    pub transform: Option<AffineTransform>,

    /// The title of the page element. Combined with description for alt text.
    pub title: Option<String>,

    /// The description of the page element. Combined with title for alt text.
    pub description: Option<String>,

    /// The specific kind of element and its properties.
    #[serde(flatten)]
    pub element_kind: PageElementKind,
}

impl PageElement {
    /// The rendered bounding box in inches.
    ///
    /// Rendered extent is `size * scale`; translation is the top-left corner.
    /// Shear is ignored. Missing size or transform reads as zero.
    pub fn frame(&self) -> Rect {
        let (width_emu, height_emu) = self.size.as_ref().map_or((0.0, 0.0), |s| {
            (
                s.width.as_ref().map_or(0.0, |d| d.to_emu()),
                s.height.as_ref().map_or(0.0, |d| d.to_emu()),
            )
        });
        let (scale_x, scale_y, (x_emu, y_emu)) = match &self.transform {
            Some(t) => (
                t.scale_x.unwrap_or(1.0),
                t.scale_y.unwrap_or(1.0),
                t.translation_emu(),
            ),
            None => (1.0, 1.0, (0.0, 0.0)),
        };
        Rect::new(
            emu_to_inches(x_emu),
            emu_to_inches(y_emu),
            emu_to_inches(width_emu * scale_x),
            emu_to_inches(height_emu * scale_y),
        )
    }

    /// Visible text of a shape, or a table's cells row by row with `|`
    /// between columns. Trailing paragraph breaks are dropped.
    pub fn text(&self) -> Option<String> {
        let trimmed = |content: &TextContent| content.plain_text().trim_end_matches('\n').to_string();
        match &self.element_kind {
            PageElementKind::Shape(shape) => shape.text.as_ref().map(trimmed),
            PageElementKind::Table(table) => Some(
                table
                    .rows()
                    .iter()
                    .map(|row| {
                        row.table_cells
                            .as_deref()
                            .unwrap_or(&[])
                            .iter()
                            .map(|cell| cell.text.as_ref().map(trimmed).unwrap_or_default())
                            .collect::<Vec<_>>()
                            .join(" | ")
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            PageElementKind::Image(_) | PageElementKind::Chart(_) => None,
        }
    }
}
