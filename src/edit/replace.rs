//! Guarded find and replace across every text shape and table cell.
//!
//! An instruction only mutates when its text occurs exactly once, or when the
//! caller opted into replacing every occurrence. Anything else is reported
//! as blocked with the match locations and leaves the presentation untouched.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::refit::{refit_runs, replace_in_runs};
use crate::config::LayoutConfig;
use crate::models::elements::PageElementKind;
use crate::models::presentation::Presentation;
use crate::models::text::TextContent;
use crate::units::emu_to_inches;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceInstruction {
    pub find: String,
    pub replace: String,
    /// Replace every occurrence even when there is more than one.
    #[serde(default)]
    pub replace_all: bool,
}

/// Where an instruction's text occurs: a shape, or one cell of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLocation {
    pub slide_index: usize,
    pub element_index: usize,
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedReplacement {
    pub find: String,
    pub replace: String,
    pub replacements: usize,
    pub locations: Vec<MatchLocation>,
}

/// An ambiguous instruction that was not applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedReplacement {
    pub find: String,
    pub match_count: usize,
    pub locations: Vec<MatchLocation>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaceOutcome {
    pub total_replacements: usize,
    pub applied: Vec<AppliedReplacement>,
    pub blocked: Vec<BlockedReplacement>,
    pub warnings: Vec<String>,
}

fn occurrences(content: Option<&TextContent>, find: &str) -> usize {
    content.map_or(0, |c| c.plain_text().matches(find).count())
}

/// Every shape and table cell containing `find`, in slide order.
pub fn scan(presentation: &Presentation, find: &str) -> Vec<MatchLocation> {
    let mut locations = Vec::new();
    if find.is_empty() {
        return locations;
    }
    for (slide_index, slide) in presentation.slides().iter().enumerate() {
        for (element_index, element) in slide.elements().iter().enumerate() {
            let location = |row, column, occurrences| MatchLocation {
                slide_index,
                element_index,
                object_id: element.object_id.clone(),
                row,
                column,
                occurrences,
            };
            match &element.element_kind {
                PageElementKind::Shape(shape) => {
                    let n = occurrences(shape.text.as_ref(), find);
                    if n > 0 {
                        locations.push(location(None, None, n));
                    }
                }
                PageElementKind::Table(table) => {
                    for (row_index, row) in table.rows().iter().enumerate() {
                        let cells = row.table_cells.as_deref().unwrap_or(&[]);
                        for (column_index, cell) in cells.iter().enumerate() {
                            let n = occurrences(cell.text.as_ref(), find);
                            if n > 0 {
                                locations.push(location(Some(row_index), Some(column_index), n));
                            }
                        }
                    }
                }
                PageElementKind::Image(_) | PageElementKind::Chart(_) => {}
            }
        }
    }
    locations
}

/// Rewrites the text at one location. Returns false if it no longer exists.
fn rewrite(
    presentation: &mut Presentation,
    location: &MatchLocation,
    instruction: &ReplaceInstruction,
    config: &LayoutConfig,
) -> bool {
    let Some(element) = presentation
        .slides_mut()
        .get_mut(location.slide_index)
        .and_then(|slide| slide.elements_mut().get_mut(location.element_index))
    else {
        return false;
    };
    let frame = element.frame();
    let (content, width, height) = match (&mut element.element_kind, location.row, location.column) {
        (PageElementKind::Shape(shape), None, None) => {
            (shape.text.as_mut(), frame.width, frame.height)
        }
        (PageElementKind::Table(table), Some(row), Some(column)) => {
            let width = emu_to_inches(table.column_width_emu(column));
            let height = emu_to_inches(table.row_height_emu(row));
            let content = table.cell_mut(row, column).and_then(|cell| cell.text.as_mut());
            (content, width, height)
        }
        _ => (None, 0.0, 0.0),
    };
    let Some(content) = content else {
        return false;
    };

    if replace_in_runs(content, &instruction.find, &instruction.replace) == 0 {
        return false;
    }
    refit_runs(content, width, height, None, config);
    true
}

/// Applies each instruction independently.
pub fn find_and_replace(
    presentation: &mut Presentation,
    instructions: &[ReplaceInstruction],
    config: &LayoutConfig,
) -> ReplaceOutcome {
    let mut outcome = ReplaceOutcome::default();

    for instruction in instructions {
        if instruction.find.is_empty() {
            outcome
                .warnings
                .push("Skipped an instruction with empty search text".to_string());
            continue;
        }

        let locations = scan(presentation, &instruction.find);
        let match_count: usize = locations.iter().map(|l| l.occurrences).sum();

        if match_count == 0 {
            outcome
                .warnings
                .push(format!("No matches found for '{}'", instruction.find));
            continue;
        }

        if match_count > 1 && !instruction.replace_all {
            warn!(
                "Blocked replacing '{}': {} matches in {} locations",
                instruction.find,
                match_count,
                locations.len()
            );
            outcome.blocked.push(BlockedReplacement {
                find: instruction.find.clone(),
                match_count,
                message: format!(
                    "'{}' occurs {} times; set replace_all to replace every occurrence",
                    instruction.find, match_count
                ),
                locations,
            });
            continue;
        }

        let mut replacements = 0;
        for location in &locations {
            if rewrite(presentation, location, instruction, config) {
                replacements += location.occurrences;
            }
        }
        info!(
            "Replaced {} occurrence(s) of '{}'",
            replacements, instruction.find
        );
        outcome.total_replacements += replacements;
        outcome.applied.push(AppliedReplacement {
            find: instruction.find.clone(),
            replace: instruction.replace.clone(),
            replacements,
            locations,
        });
    }
    outcome
}
