use serde::{Deserialize, Serialize};

use crate::models::common::Dimension;

/// Properties of each column in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnProperties {
    /// Width of a column.
    pub column_width: Option<Dimension>,
}

/// Properties of each row in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowProperties {
    /// Minimum height of the row. The row will be rendered this tall, but may be
    /// taller if content requires it.
    pub min_row_height: Option<Dimension>,
}
