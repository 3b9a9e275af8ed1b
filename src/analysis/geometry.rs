//! Read-only geometry checks over a slide's elements.

use serde::Serialize;

use crate::models::page::Page;
use crate::units::{round3, Rect};

/// Tolerance, in inches, before an edge counts as crossing the canvas.
const EDGE_EPSILON: f64 = 1e-6;

/// Coverage percentage above which an overlap is `high`.
pub const HIGH_COVERAGE: f64 = 50.0;
/// Coverage percentage above which an overlap is `medium`.
pub const MEDIUM_COVERAGE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryStatus {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// How far an element crosses one canvas edge. Left and top overflows are
/// the (negative) position; right and bottom are the positive excess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeOverflow {
    pub edge: Edge,
    pub amount: f64,
}

/// Position of one element in inches, with its canvas classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementGeometry {
    pub index: usize,
    pub object_id: String,
    pub element_type: &'static str,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub status: BoundaryStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overflow: Vec<EdgeOverflow>,
    #[serde(skip)]
    pub frame: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Classifies by the larger of the two coverage percentages.
    pub fn classify(first_coverage: f64, second_coverage: f64) -> Self {
        let coverage = first_coverage.max(second_coverage);
        if coverage > HIGH_COVERAGE {
            Severity::High
        } else if coverage > MEDIUM_COVERAGE {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Intersection of two elements. `first` is always the lower index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
    /// Shared area in square inches.
    pub area: f64,
    /// Percentage of `first`'s area inside the intersection.
    pub first_coverage: f64,
    /// Percentage of `second`'s area inside the intersection.
    pub second_coverage: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeometrySummary {
    pub total_elements: usize,
    pub inside: usize,
    pub outside: usize,
    pub overlaps: usize,
    pub high_overlaps: usize,
    pub medium_overlaps: usize,
    pub low_overlaps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryReport {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub elements: Vec<ElementGeometry>,
    pub overlaps: Vec<Overlap>,
    pub summary: GeometrySummary,
}

fn edge_overflow(frame: &Rect, canvas_width: f64, canvas_height: f64) -> Vec<EdgeOverflow> {
    let mut overflow = Vec::new();
    if frame.left < -EDGE_EPSILON {
        overflow.push(EdgeOverflow {
            edge: Edge::Left,
            amount: round3(frame.left),
        });
    }
    if frame.top < -EDGE_EPSILON {
        overflow.push(EdgeOverflow {
            edge: Edge::Top,
            amount: round3(frame.top),
        });
    }
    if frame.right() > canvas_width + EDGE_EPSILON {
        overflow.push(EdgeOverflow {
            edge: Edge::Right,
            amount: round3(frame.right() - canvas_width),
        });
    }
    if frame.bottom() > canvas_height + EDGE_EPSILON {
        overflow.push(EdgeOverflow {
            edge: Edge::Bottom,
            amount: round3(frame.bottom() - canvas_height),
        });
    }
    overflow
}

/// Positions and canvas classification of every element on `page`.
pub fn element_geometry(page: &Page, canvas_width: f64, canvas_height: f64) -> Vec<ElementGeometry> {
    page.elements()
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let frame = element.frame();
            let overflow = edge_overflow(&frame, canvas_width, canvas_height);
            ElementGeometry {
                index,
                object_id: element.object_id.clone(),
                element_type: element.element_kind.type_name(),
                left: round3(frame.left),
                top: round3(frame.top),
                width: round3(frame.width),
                height: round3(frame.height),
                status: if overflow.is_empty() {
                    BoundaryStatus::Inside
                } else {
                    BoundaryStatus::Outside
                },
                overflow,
                frame,
            }
        })
        .collect()
}

/// The overlap between two elements, or `None` when their boxes share no
/// area. Argument order does not matter.
pub fn overlap(a: &ElementGeometry, b: &ElementGeometry) -> Option<Overlap> {
    let (first, second) = if a.index <= b.index { (a, b) } else { (b, a) };
    let shared = first.frame.intersection(&second.frame)?;
    let area = shared.area();
    let first_coverage = area / first.frame.area() * 100.0;
    let second_coverage = area / second.frame.area() * 100.0;
    Some(Overlap {
        first: first.index,
        second: second.index,
        area: round3(area),
        first_coverage: round3(first_coverage),
        second_coverage: round3(second_coverage),
        severity: Severity::classify(first_coverage, second_coverage),
    })
}

/// Every intersecting unordered pair, in index order.
pub fn find_overlaps(elements: &[ElementGeometry]) -> Vec<Overlap> {
    elements
        .iter()
        .enumerate()
        .flat_map(|(i, a)| elements[i + 1..].iter().filter_map(move |b| overlap(a, b)))
        .collect()
}

/// Analyzes one slide against a canvas of the given size in inches.
pub fn analyze(page: &Page, canvas_width: f64, canvas_height: f64) -> GeometryReport {
    let elements = element_geometry(page, canvas_width, canvas_height);
    let overlaps = find_overlaps(&elements);

    let outside = elements
        .iter()
        .filter(|e| e.status == BoundaryStatus::Outside)
        .count();
    let count = |severity| overlaps.iter().filter(|o| o.severity == severity).count();
    let summary = GeometrySummary {
        total_elements: elements.len(),
        inside: elements.len() - outside,
        outside,
        overlaps: overlaps.len(),
        high_overlaps: count(Severity::High),
        medium_overlaps: count(Severity::Medium),
        low_overlaps: count(Severity::Low),
    };

    GeometryReport {
        canvas_width,
        canvas_height,
        elements,
        overlaps,
        summary,
    }
}
