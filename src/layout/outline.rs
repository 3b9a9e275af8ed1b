//! Outline assembly: one slide per level-1 heading section.

use log::{info, warn};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};
use serde::Serialize;

use super::driver::{layout_blocks, SkippedBlock};
use super::placer::PlacedShape;
use crate::config::LayoutConfig;
use crate::document::new_object_id;
use crate::markup::{self, markup_options, plain_text, Block};
use crate::models::colors::RgbColor;
use crate::models::page::Page;
use crate::models::presentation::Presentation;

/// Result of rendering one outline section onto its own slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub slide_index: usize,
    pub title: Option<String>,
    pub success: bool,
    pub elements_created: usize,
    pub shapes: Vec<PlacedShape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Byte offsets of the lines where a top-level level-1 heading starts, as
/// the markup parser sees it: ATX and setext alike, never inside a fence,
/// quote or list.
fn section_starts(outline: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut depth = 0usize;
    for (event, range) in Parser::new_ext(outline, markup_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if depth == 0 => {
                let line_start = outline[..range.start].rfind('\n').map_or(0, |i| i + 1);
                starts.push(line_start);
                depth += 1;
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    starts
}

/// Splits an outline into sections, each starting at a level-1 heading.
///
/// Text before the first heading is dropped. Without any level-1 heading the
/// whole outline is one section, and a blank outline has none.
pub fn split_outline(outline: &str) -> Vec<String> {
    let starts = section_starts(outline);
    if starts.is_empty() {
        return if outline.trim().is_empty() {
            Vec::new()
        } else {
            vec![outline.to_string()]
        };
    }
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(outline.len());
            outline[start..end].to_string()
        })
        .collect()
}

/// Appends one slide per outline section and lays each section out on it.
///
/// Sections are independent: one that places nothing is reported as failed
/// and the rest still render.
pub fn build_outline(
    presentation: &mut Presentation,
    outline: &str,
    config: &LayoutConfig,
    color: Option<&RgbColor>,
) -> Vec<SectionResult> {
    let sections = split_outline(outline);
    let mut results = Vec::with_capacity(sections.len());

    for section in &sections {
        let blocks = markup::parse(section);
        let title = blocks.iter().find_map(|block| match block {
            Block::Heading { level: 1, content } => Some(plain_text(content)),
            _ => None,
        });

        let slides = presentation.slides_mut();
        slides.push(Page::new_slide(new_object_id("slide")));
        let slide_index = slides.len() - 1;
        let layout = layout_blocks(&mut slides[slide_index], &blocks, config, color);

        let success = !layout.shapes.is_empty();
        let error = (!success).then(|| {
            format!(
                "no block could be placed ({} parsed, {} skipped)",
                blocks.len(),
                layout.skipped.len()
            )
        });
        if let Some(e) = &error {
            warn!("Outline section on slide {} failed: {}", slide_index, e);
        }
        results.push(SectionResult {
            slide_index,
            title,
            success,
            elements_created: layout.shapes.len(),
            shapes: layout.shapes,
            skipped: layout.skipped,
            error,
        });
    }

    info!(
        "Built {} slides from outline ({} succeeded)",
        results.len(),
        results.iter().filter(|r| r.success).count()
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Size;
    use crate::models::elements::PageElementKind;

    fn deck() -> Presentation {
        Presentation::new("p", Size::emu(9144000.0, 6858000.0))
    }

    fn slide_texts(page: &Page) -> Vec<String> {
        page.elements()
            .iter()
            .filter_map(|e| match &e.element_kind {
                PageElementKind::Shape(shape) => shape.text.as_ref().map(|t| t.plain_text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn three_sections_make_three_slides() {
        let outline = "# One\n\nalpha\n\n# Two\n\n- beta\n- gamma\n\n# Three\n\ndelta\n";
        let mut presentation = deck();
        let results = build_outline(&mut presentation, outline, &LayoutConfig::default(), None);

        assert_eq!(results.len(), 3);
        assert_eq!(presentation.slide_count(), 3);
        assert!(results.iter().all(|r| r.success));
        let titles: Vec<_> = results.iter().map(|r| r.title.clone().unwrap()).collect();
        assert_eq!(titles, ["One", "Two", "Three"]);

        let first = slide_texts(&presentation.slides()[0]);
        assert_eq!(first, ["One\n", "alpha\n"]);
        let second = slide_texts(&presentation.slides()[1]);
        assert_eq!(second, ["Two\n", "• beta\n• gamma\n"]);
        let third = slide_texts(&presentation.slides()[2]);
        assert_eq!(third, ["Three\n", "delta\n"]);
    }

    #[test]
    fn preamble_is_dropped_when_headings_exist() {
        let sections = split_outline("intro\n# A\nx\n## sub\n# B\n");
        assert_eq!(sections, ["# A\nx\n## sub\n", "# B\n"]);
    }

    #[test]
    fn outline_without_headings_is_one_section() {
        assert_eq!(split_outline("just text\n\nmore"), ["just text\n\nmore"]);
        assert!(split_outline(" \n\n").is_empty());
    }

    #[test]
    fn headings_inside_code_fences_do_not_split() {
        let sections = split_outline("# A\n```\n# not a heading\n```\n# B\n");
        assert_eq!(sections.len(), 2);
        assert!(sections[0].contains("# not a heading"));
    }

    #[test]
    fn setext_headings_split_like_atx() {
        let sections = split_outline("One\n===\n\nalpha\n\nTwo\n===\n\nbeta\n");
        assert_eq!(sections, ["One\n===\n\nalpha\n\n", "Two\n===\n\nbeta\n"]);

        let mut presentation = deck();
        let results = build_outline(
            &mut presentation,
            "One\n===\n\nalpha\n\nTwo\n===\n\nbeta\n",
            &LayoutConfig::default(),
            None,
        );
        assert_eq!(results.len(), 2);
        let kinds: Vec<_> = results[0].shapes.iter().map(|s| s.block_type).collect();
        assert_eq!(kinds, ["title", "paragraph"]);
        assert_eq!(slide_texts(&presentation.slides()[1]), ["Two\n", "beta\n"]);
    }

    #[test]
    fn only_top_level_headings_split() {
        let outline = "# A\n> # quoted\n\n- # in a list\n\n#hashtag\n    # code\n# B\n";
        let sections = split_outline(outline);
        assert_eq!(sections.len(), 2);
        assert!(sections[0].contains("> # quoted"));
        assert_eq!(sections[1], "# B\n");
    }

    #[test]
    fn section_with_nothing_placeable_is_reported() {
        let mut presentation = deck();
        let results = build_outline(
            &mut presentation,
            "# Ok\n\nbody\n",
            &LayoutConfig {
                margin_left: 5.0,
                margin_right: 5.0,
                ..LayoutConfig::default()
            },
            None,
        );
        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].error.is_some());
        assert_eq!(results[0].skipped.len(), 2);
    }
}
