use serde::{Deserialize, Serialize};

/// The rendering style of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartType {
    #[default]
    Bar,
    Column,
    Line,
    Pie,
}

/// One named data series, aligned with the chart's categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// A PageElement kind representing a chart built from inline data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub chart_type: ChartType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Category labels along the category axis.
    pub categories: Vec<String>,

    pub series: Vec<ChartSeries>,
}
