//! Shape primitives: append positioned elements to a slide.
//!
//! Callers give an absolute [`Rect`] in inches plus content; the editor
//! converts to EMU, builds the page element and returns a [`ShapeHandle`].
//! No layout decisions are made here.

mod error;
mod text_frame;

pub use error::DocumentError;
pub use text_frame::{build_text_content, ParagraphSpec, RunSpec};

use log::debug;
use serde::Serialize;
use uuid::Uuid;

use crate::models::chart::Chart;
use crate::models::common::{AffineTransform, Dimension, Size};
use crate::models::elements::{PageElement, PageElementKind};
use crate::models::image::Image;
use crate::models::page::Page;
use crate::models::placeholder::Placeholder;
use crate::models::shape::{Shape, ShapeType};
use crate::models::table::{Table, TableCell, TableCellLocation, TableRow};
use crate::models::table_properties::{TableColumnProperties, TableRowProperties};
use crate::units::{inches_to_emu, Rect};

/// Identifies an element created by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeHandle {
    pub object_id: String,
    /// Position in the slide's element list at creation time.
    pub element_index: usize,
}

/// Generates an object id unique across the presentation.
pub fn new_object_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Writes elements onto one slide.
pub struct SlideEditor<'a> {
    page: &'a mut Page,
}

impl<'a> SlideEditor<'a> {
    pub fn new(page: &'a mut Page) -> Self {
        Self { page }
    }

    pub fn element_count(&self) -> usize {
        self.page.elements().len()
    }

    /// Adds a text box holding the given paragraphs.
    pub fn add_text_box(
        &mut self,
        frame: Rect,
        paragraphs: &[ParagraphSpec],
    ) -> Result<ShapeHandle, DocumentError> {
        self.add_shape(frame, paragraphs, None)
    }

    /// Adds a text box tagged as a layout placeholder (title, subtitle).
    pub fn add_placeholder_text(
        &mut self,
        frame: Rect,
        paragraphs: &[ParagraphSpec],
        placeholder: Placeholder,
    ) -> Result<ShapeHandle, DocumentError> {
        self.add_shape(frame, paragraphs, Some(placeholder))
    }

    fn add_shape(
        &mut self,
        frame: Rect,
        paragraphs: &[ParagraphSpec],
        placeholder: Option<Placeholder>,
    ) -> Result<ShapeHandle, DocumentError> {
        check_frame("text box", frame)?;
        let shape = Shape {
            shape_type: Some(ShapeType::TextBox),
            text: Some(build_text_content(paragraphs)),
            placeholder,
        };
        Ok(self.push("shape", frame, PageElementKind::Shape(shape)))
    }

    /// Adds a table whose rows and columns evenly divide `frame`.
    ///
    /// `cells[row][column]` holds each cell's paragraphs. Short rows are padded
    /// with empty cells up to the widest row.
    pub fn add_table(
        &mut self,
        frame: Rect,
        cells: &[Vec<Vec<ParagraphSpec>>],
    ) -> Result<ShapeHandle, DocumentError> {
        check_frame("table", frame)?;
        let rows = cells.len();
        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        if rows == 0 || columns == 0 {
            return Err(DocumentError::EmptyTable);
        }

        let column_width = inches_to_emu(frame.width / columns as f64);
        let row_height = inches_to_emu(frame.height / rows as f64);
        let table_rows = cells
            .iter()
            .enumerate()
            .map(|(row_index, row)| TableRow {
                row_height: Some(Dimension::emu(row_height)),
                table_cells: Some(
                    (0..columns)
                        .map(|column_index| TableCell {
                            location: Some(TableCellLocation {
                                row_index: i32::try_from(row_index).ok(),
                                column_index: i32::try_from(column_index).ok(),
                            }),
                            text: Some(build_text_content(
                                row.get(column_index).map(Vec::as_slice).unwrap_or(&[]),
                            )),
                        })
                        .collect(),
                ),
                table_row_properties: Some(TableRowProperties {
                    min_row_height: Some(Dimension::emu(row_height)),
                }),
            })
            .collect();

        let table = Table {
            rows: i32::try_from(rows).unwrap_or(i32::MAX),
            columns: i32::try_from(columns).unwrap_or(i32::MAX),
            table_columns: Some(
                (0..columns)
                    .map(|_| TableColumnProperties {
                        column_width: Some(Dimension::emu(column_width)),
                    })
                    .collect(),
            ),
            table_rows: Some(table_rows),
        };
        Ok(self.push("table", frame, PageElementKind::Table(table)))
    }

    pub fn add_image(
        &mut self,
        frame: Rect,
        source_url: &str,
    ) -> Result<ShapeHandle, DocumentError> {
        check_frame("image", frame)?;
        let image = Image {
            content_url: None,
            source_url: Some(source_url.to_string()),
        };
        Ok(self.push("image", frame, PageElementKind::Image(image)))
    }

    pub fn add_chart(&mut self, frame: Rect, chart: Chart) -> Result<ShapeHandle, DocumentError> {
        check_frame("chart", frame)?;
        if chart.categories.is_empty() || chart.series.is_empty() {
            return Err(DocumentError::EmptyChart);
        }
        if let Some(bad) = chart
            .series
            .iter()
            .find(|s| s.values.len() != chart.categories.len())
        {
            return Err(DocumentError::SeriesLengthMismatch {
                name: bad.name.clone(),
                expected: chart.categories.len(),
                actual: bad.values.len(),
            });
        }
        Ok(self.push("chart", frame, PageElementKind::Chart(chart)))
    }

    fn push(&mut self, prefix: &str, frame: Rect, kind: PageElementKind) -> ShapeHandle {
        let object_id = new_object_id(prefix);
        let element = PageElement {
            object_id: object_id.clone(),
            size: Some(Size::emu(
                inches_to_emu(frame.width),
                inches_to_emu(frame.height),
            )),
            transform: Some(AffineTransform::translate(
                inches_to_emu(frame.left),
                inches_to_emu(frame.top),
            )),
            title: None,
            description: None,
            element_kind: kind,
        };
        let elements = self.page.elements_mut();
        elements.push(element);
        let element_index = elements.len() - 1;
        debug!(
            "Created {} '{}' at ({:.2}, {:.2}) size {:.2}x{:.2}in",
            prefix, object_id, frame.left, frame.top, frame.width, frame.height
        );
        ShapeHandle {
            object_id,
            element_index,
        }
    }
}

fn check_frame(kind: &'static str, rect: Rect) -> Result<(), DocumentError> {
    if rect.is_finite() && rect.width > 0.0 && rect.height > 0.0 {
        Ok(())
    } else {
        Err(DocumentError::InvalidGeometry { kind, rect })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::{ChartSeries, ChartType};

    fn paragraph(text: &str) -> Vec<ParagraphSpec> {
        let mut p = ParagraphSpec::new(None);
        p.runs.push(RunSpec {
            text: text.to_string(),
            font_family: "Calibri".to_string(),
            font_size: 14.0,
            ..RunSpec::default()
        });
        vec![p]
    }

    #[test]
    fn text_box_is_placed_in_emu() {
        let mut page = Page::new_slide("s1");
        let handle = SlideEditor::new(&mut page)
            .add_text_box(Rect::new(0.5, 1.0, 9.0, 0.5), &paragraph("Hi"))
            .unwrap();
        assert_eq!(handle.element_index, 0);
        assert!(handle.object_id.starts_with("shape_"));

        let element = &page.elements()[0];
        assert_eq!(element.frame(), Rect::new(0.5, 1.0, 9.0, 0.5));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let mut page = Page::new_slide("s1");
        let mut editor = SlideEditor::new(&mut page);
        let err = editor
            .add_text_box(Rect::new(0.0, 0.0, 0.0, 1.0), &paragraph("x"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidGeometry { .. }));
        let err = editor
            .add_image(Rect::new(0.0, f64::NAN, 1.0, 1.0), "https://example.com/a.png")
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidGeometry { .. }));
        assert_eq!(editor.element_count(), 0);
    }

    #[test]
    fn ragged_table_rows_are_padded() {
        let mut page = Page::new_slide("s1");
        let cells = vec![
            vec![paragraph("a"), paragraph("b"), paragraph("c")],
            vec![paragraph("d")],
        ];
        SlideEditor::new(&mut page)
            .add_table(Rect::new(0.5, 2.0, 9.0, 0.8), &cells)
            .unwrap();
        match &page.elements()[0].element_kind {
            PageElementKind::Table(table) => {
                assert_eq!((table.rows, table.columns), (2, 3));
                let empty = table.cell(1, 2).unwrap().text.as_ref().unwrap();
                assert_eq!(empty.plain_text(), "\n");
                assert_eq!(table.column_width_emu(0), inches_to_emu(3.0));
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn empty_table_is_an_error() {
        let mut page = Page::new_slide("s1");
        let err = SlideEditor::new(&mut page)
            .add_table(Rect::new(0.0, 0.0, 1.0, 1.0), &[])
            .unwrap_err();
        assert_eq!(err, DocumentError::EmptyTable);
    }

    #[test]
    fn chart_series_must_match_categories() {
        let mut page = Page::new_slide("s1");
        let chart = Chart {
            chart_type: ChartType::Column,
            title: None,
            categories: vec!["Q1".into(), "Q2".into()],
            series: vec![ChartSeries {
                name: "Revenue".into(),
                values: vec![1.0],
            }],
        };
        let err = SlideEditor::new(&mut page)
            .add_chart(Rect::new(1.0, 1.0, 4.0, 3.0), chart)
            .unwrap_err();
        assert!(matches!(err, DocumentError::SeriesLengthMismatch { actual: 1, .. }));
    }
}
