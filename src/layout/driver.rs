//! Slide layout driver: stacks a block sequence down one slide.

use log::{info, warn};
use serde::Serialize;

use super::cursor::LayoutCursor;
use super::placer::{BlockPlacer, PlacedShape};
use crate::config::LayoutConfig;
use crate::document::SlideEditor;
use crate::markup::{self, Block};
use crate::models::colors::RgbColor;
use crate::models::page::Page;
use crate::units::round3;

/// A block that could not be placed. Layout carried on without it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedBlock {
    pub block_index: usize,
    pub block_type: &'static str,
    pub reason: String,
}

/// Outcome of laying out one block sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideLayout {
    pub shapes: Vec<PlacedShape>,
    pub skipped: Vec<SkippedBlock>,
    /// Cursor position after the last placed block, in inches.
    pub cursor_end: f64,
}

impl SlideLayout {
    pub fn elements_created(&self) -> usize {
        self.shapes.len()
    }
}

/// Places `blocks` in order, starting at the top margin.
///
/// A block whose shape cannot be created is recorded in
/// [`SlideLayout::skipped`] and the cursor stays where it was.
pub fn layout_blocks(
    page: &mut Page,
    blocks: &[Block],
    config: &LayoutConfig,
    color: Option<&RgbColor>,
) -> SlideLayout {
    let placer = BlockPlacer::new(config, color);
    let mut editor = SlideEditor::new(page);
    let mut shapes = Vec::with_capacity(blocks.len());
    let mut skipped = Vec::new();
    let mut cursor = LayoutCursor::at(config.margin_top);

    for (block_index, block) in blocks.iter().enumerate() {
        match placer.place(&mut editor, block, cursor) {
            Ok(placement) => {
                shapes.push(placement.shape);
                cursor = placement.next;
            }
            Err(e) => {
                warn!("Skipping {} block {}: {}", block.kind_name(), block_index, e);
                skipped.push(SkippedBlock {
                    block_index,
                    block_type: block.kind_name(),
                    reason: e.to_string(),
                });
            }
        }
    }

    SlideLayout {
        shapes,
        skipped,
        cursor_end: round3(cursor.top()),
    }
}

/// Parses `source` and lays the resulting blocks out on `page`.
pub fn layout_markup(
    page: &mut Page,
    source: &str,
    config: &LayoutConfig,
    color: Option<&RgbColor>,
) -> SlideLayout {
    let blocks = markup::parse(source);
    let layout = layout_blocks(page, &blocks, config, color);
    info!(
        "Laid out {} of {} blocks on slide '{}'",
        layout.shapes.len(),
        blocks.len(),
        page.object_id
    );
    layout
}
