//! Request and result payloads of the service actions.

use serde::{Deserialize, Serialize};

use super::file::FileAttachment;
use crate::analysis::{ElementGeometry, GeometrySummary, Overlap};
use crate::edit::{
    AppliedReplacement, BlockedReplacement, CellUpdate, PositionUpdate, ReplaceInstruction,
};
use crate::layout::{PlacedShape, SectionResult, SkippedBlock};
use crate::models::chart::{ChartSeries, ChartType};
use crate::units::Rect;

/// Envelope of every action result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub result: T,
    /// The whole presentation after a mutating action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
}

impl<T> ActionResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            message: None,
            result,
            file: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_file(mut self, file: FileAttachment) -> Self {
        self.file = Some(file);
        self
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}

/// Names the presentation an action works on. When the id is not held, the
/// presentation is reloaded from `input_file` if one is supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationRef {
    pub presentation_id: String,
    pub input_file: Option<String>,
}

impl PresentationRef {
    pub fn new(presentation_id: impl Into<String>) -> Self {
        Self {
            presentation_id: presentation_id.into(),
            input_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePresentationRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationCreated {
    pub presentation_id: String,
    pub slide_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadPresentationRequest {
    pub input_file: String,
    /// Id to store the presentation under; defaults to the id inside the file.
    pub presentation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSlideRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideAdded {
    pub slide_index: usize,
    pub slide_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSlideRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    pub markup: String,
    /// `#RRGGBB` applied to every run.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideBuilt {
    pub slide_index: usize,
    pub elements_created: usize,
    pub shapes: Vec<PlacedShape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOutlineRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub outline: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineBuilt {
    pub slides_created: usize,
    pub slide_count: usize,
    pub per_slide_results: Vec<SectionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSlideElementsRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    #[serde(default)]
    pub include_content: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementReport {
    #[serde(flatten)]
    pub geometry: ElementGeometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideElements {
    pub slide_index: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub elements: Vec<ElementReport>,
    pub overlaps: Vec<Overlap>,
    pub summary: GeometrySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyElementRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    pub element_index: usize,
    pub position: Option<PositionUpdate>,
    #[serde(default)]
    pub table_cell_updates: Vec<CellUpdate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementModified {
    pub new_position: Rect,
    pub changes_made: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindReplaceRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub replacements: Vec<ReplaceInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementsMade {
    pub total_replacements: usize,
    pub applied: Vec<AppliedReplacement>,
    pub blocked: Vec<BlockedReplacement>,
    pub warnings: Vec<String>,
}

/// Explicit placement of a box, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Frame> for Rect {
    fn from(frame: Frame) -> Self {
        Rect::new(frame.left, frame.top, frame.width, frame.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTextBoxRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    #[serde(flatten)]
    pub frame: Frame,
    pub text: String,
    /// Upper bound for the fitted size, in points.
    pub font_size: Option<f64>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    pub color: Option<String>,
    /// `left`, `center`, `right` or `justify`.
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddImageRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    #[serde(flatten)]
    pub frame: Frame,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTableRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    #[serde(flatten)]
    pub frame: Frame,
    pub rows: Vec<Vec<String>>,
    /// Style the first row as a header.
    #[serde(default = "default_true")]
    pub header: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddChartRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
    pub slide_index: usize,
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default)]
    pub chart_type: ChartType,
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementAdded {
    pub slide_index: usize,
    pub element_index: usize,
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMarkdownRequest {
    #[serde(flatten)]
    pub target: PresentationRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkdownExport {
    pub markdown: String,
}
