use serde::{Deserialize, Serialize};

use crate::models::common::Dimension;
use crate::models::table_properties::{TableColumnProperties, TableRowProperties};
use crate::models::text::TextContent;

/// A location of a single table cell within a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    /// The 0-based row index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<i32>,
    /// The 0-based column index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_index: Option<i32>,
}

/// Properties and contents of each cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// The location of the cell within the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TableCellLocation>,

    /// The text content of the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

/// Properties and contents of each row in a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Height of the row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<Dimension>,
    /// Properties and contents of each cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_cells: Option<Vec<TableCell>>,
    /// Properties of the row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_row_properties: Option<TableRowProperties>,
}

/// A PageElement kind representing a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Number of rows in the table.
    pub rows: i32,
    /// Number of columns in the table.
    pub columns: i32,

    /// Properties of each column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_columns: Option<Vec<TableColumnProperties>>,

    /// Properties and contents of each row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_rows: Option<Vec<TableRow>>,
}

impl Table {
    pub fn rows(&self) -> &[TableRow] {
        self.table_rows.as_deref().unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows()
            .get(row)
            .and_then(|r| r.table_cells.as_ref())
            .and_then(|cells| cells.get(column))
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell> {
        self.table_rows
            .as_mut()
            .and_then(|rows| rows.get_mut(row))
            .and_then(|r| r.table_cells.as_mut())
            .and_then(|cells| cells.get_mut(column))
    }

    /// Width of a column in EMU, or zero when unknown.
    pub fn column_width_emu(&self, column: usize) -> f64 {
        self.table_columns
            .as_ref()
            .and_then(|cols| cols.get(column))
            .and_then(|c| c.column_width.as_ref())
            .map_or(0.0, Dimension::to_emu)
    }

    /// Height of a row in EMU, or zero when unknown.
    pub fn row_height_emu(&self, row: usize) -> f64 {
        self.rows()
            .get(row)
            .and_then(|r| r.row_height.as_ref())
            .map_or(0.0, Dimension::to_emu)
    }

    /// Scales every column width by `x` and every row height by `y`, so each
    /// track keeps its share of a resized table.
    pub fn scale_tracks(&mut self, x: f64, y: f64) {
        fn scale(dimension: &mut Option<Dimension>, factor: f64) {
            if let Some(d) = dimension.as_mut() {
                *d = Dimension::emu((d.to_emu() * factor).round());
            }
        }
        for column in self.table_columns.iter_mut().flatten() {
            scale(&mut column.column_width, x);
        }
        for row in self.table_rows.iter_mut().flatten() {
            scale(&mut row.row_height, y);
            if let Some(properties) = row.table_row_properties.as_mut() {
                scale(&mut properties.min_row_height, y);
            }
        }
    }
}
