//! Rewrites text containers while keeping their look: in-place replacement
//! inside styled runs, and full re-rendering from a captured template.

use crate::config::LayoutConfig;
use crate::document::{build_text_content, ParagraphSpec, RunSpec};
use crate::layout::fit::{self, FitHints};
use crate::models::colors::RgbColor;
use crate::models::common::Dimension;
use crate::models::properties::{Alignment, ParagraphStyle};
use crate::models::text::TextContent;
use crate::models::text_element::{TextElement, TextElementKind};
use crate::units::PT_PER_INCH;

/// Size used when the existing text carries none.
const FALLBACK_FONT_SIZE: f64 = 18.0;

/// Styling lifted from existing text: the first run's character style and
/// each paragraph's alignment and indent.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTemplate {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<RgbColor>,
    paragraphs: Vec<(Option<Alignment>, f64)>,
}

impl TextTemplate {
    pub fn from_content(content: &TextContent) -> Self {
        let style = content.first_run_style();
        let paragraphs = content
            .elements()
            .iter()
            .filter_map(|element| match &element.kind {
                TextElementKind::ParagraphMarker(marker) => Some(paragraph_layout(marker.style.as_ref())),
                TextElementKind::TextRun(_) => None,
            })
            .collect();
        Self {
            font_family: style.and_then(|s| s.font_family.clone()),
            font_size: style.and_then(|s| s.font_size.as_ref()).map(|d| d.to_pt()),
            bold: style.and_then(|s| s.bold).unwrap_or(false),
            italic: style.and_then(|s| s.italic).unwrap_or(false),
            underline: style.and_then(|s| s.underline).unwrap_or(false),
            color: style
                .and_then(|s| s.foreground_color.as_ref())
                .and_then(|c| c.as_rgb())
                .cloned(),
            paragraphs,
        }
    }

    fn hints(&self) -> FitHints {
        FitHints {
            formatted: self.bold || self.italic || self.underline,
            bullets: false,
        }
    }

    /// Lays `text` into a `width` x `height` box, one paragraph per line,
    /// sized by the fit estimator. `max_size` defaults to the template's size.
    pub fn render(
        &self,
        text: &str,
        width: f64,
        height: f64,
        max_size: Option<f64>,
        config: &LayoutConfig,
    ) -> (TextContent, u32) {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let max_size = max_size
            .or(self.font_size)
            .unwrap_or(FALLBACK_FONT_SIZE);
        let size = fit::estimate(&config.fit, text, width, height, max_size, self.hints());
        let family = self
            .font_family
            .clone()
            .unwrap_or_else(|| config.font_family.clone());

        let paragraphs: Vec<ParagraphSpec> = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                let (alignment, indent) = self
                    .paragraphs
                    .get(i)
                    .or(self.paragraphs.last())
                    .cloned()
                    .unwrap_or((None, 0.0));
                ParagraphSpec {
                    runs: vec![RunSpec {
                        text: line.to_string(),
                        font_family: family.clone(),
                        font_size: f64::from(size),
                        bold: self.bold,
                        italic: self.italic,
                        underline: self.underline,
                        strikethrough: false,
                        link: None,
                        color: self.color.clone(),
                    }],
                    alignment,
                    indent_start: indent,
                }
            })
            .collect();
        (build_text_content(&paragraphs), size)
    }
}

/// Run index holding the byte at `offset` of the concatenated text.
fn run_at(starts: &[(usize, usize)], offset: usize) -> usize {
    starts
        .partition_point(|&(_, start)| start <= offset)
        .saturating_sub(1)
}

fn slice_from(text: &str, from: usize) -> &str {
    text.get(from..).unwrap_or("")
}

fn slice_to(text: &str, to: usize) -> &str {
    text.get(..to).unwrap_or(text)
}

/// Replaces every occurrence of `find` inside the existing runs, so each
/// run keeps its own style. A match spanning several runs is written into
/// the first of them and cut from the others. Returns the occurrences
/// replaced.
pub fn replace_in_runs(content: &mut TextContent, find: &str, replace: &str) -> usize {
    if find.is_empty() {
        return 0;
    }
    let Some(elements) = content.text_elements.as_mut() else {
        return 0;
    };

    // (element position, byte offset of the run in the concatenated text)
    let mut starts = Vec::new();
    let mut text = String::new();
    for (position, element) in elements.iter().enumerate() {
        if let TextElementKind::TextRun(run) = &element.kind {
            starts.push((position, text.len()));
            text.push_str(run.content.as_deref().unwrap_or(""));
        }
    }
    let matches: Vec<(usize, usize)> = text
        .match_indices(find)
        .map(|(start, found)| (start, start + found.len()))
        .collect();

    // Back to front, so the offsets of earlier matches stay valid.
    for &(start, end) in matches.iter().rev() {
        let first = run_at(&starts, start);
        let last = run_at(&starts, end - 1);
        for k in first..=last {
            let (position, run_start) = starts[k];
            let TextElementKind::TextRun(run) = &mut elements[position].kind else {
                continue;
            };
            let current = run.content.take().unwrap_or_default();
            let updated = if k == first && k == last {
                format!(
                    "{}{}{}",
                    slice_to(&current, start - run_start),
                    replace,
                    slice_from(&current, end - run_start)
                )
            } else if k == first {
                format!("{}{}", slice_to(&current, start - run_start), replace)
            } else if k == last {
                slice_from(&current, end - run_start).to_string()
            } else {
                String::new()
            };
            run.content = Some(updated);
        }
    }

    if !matches.is_empty() {
        drop_emptied(elements);
        content.reindex();
    }
    matches.len()
}

/// Removes runs left empty by a replacement, then paragraph markers that no
/// longer own a run.
fn drop_emptied(elements: &mut Vec<TextElement>) {
    elements.retain(|element| match &element.kind {
        TextElementKind::TextRun(run) => run.content.as_deref().is_some_and(|c| !c.is_empty()),
        TextElementKind::ParagraphMarker(_) => true,
    });
    let owns_run: Vec<bool> = (0..elements.len())
        .map(|i| {
            matches!(
                elements.get(i + 1).map(|e| &e.kind),
                Some(TextElementKind::TextRun(_))
            )
        })
        .collect();
    let mut i = 0;
    elements.retain(|element| {
        let keep = match element.kind {
            TextElementKind::ParagraphMarker(_) => owns_run[i],
            TextElementKind::TextRun(_) => true,
        };
        i += 1;
        keep
    });
}

/// Re-derives one font size for every run from the current text. The ceiling
/// is `max_size`, else the first run's size, else the fallback size.
pub fn refit_runs(
    content: &mut TextContent,
    width: f64,
    height: f64,
    max_size: Option<f64>,
    config: &LayoutConfig,
) -> u32 {
    let max_size = max_size
        .or_else(|| {
            content
                .first_run_style()
                .and_then(|s| s.font_size.as_ref())
                .map(|d| d.to_pt())
        })
        .unwrap_or(FALLBACK_FONT_SIZE);
    let formatted = content.elements().iter().any(|element| match &element.kind {
        TextElementKind::TextRun(run) => run.style.as_ref().is_some_and(|s| {
            s.bold == Some(true) || s.italic == Some(true) || s.underline == Some(true)
        }),
        TextElementKind::ParagraphMarker(_) => false,
    });
    let hints = FitHints {
        formatted,
        bullets: false,
    };
    let text = content.plain_text();
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let size = fit::estimate(&config.fit, text, width, height, max_size, hints);

    if let Some(elements) = content.text_elements.as_mut() {
        for element in elements {
            if let TextElementKind::TextRun(run) = &mut element.kind {
                run.style.get_or_insert_with(Default::default).font_size =
                    Some(Dimension::pt(f64::from(size)));
            }
        }
    }
    size
}

fn paragraph_layout(style: Option<&ParagraphStyle>) -> (Option<Alignment>, f64) {
    let alignment = style.and_then(|s| s.alignment.clone());
    let indent = style
        .and_then(|s| s.indent_start.as_ref())
        .map_or(0.0, |d| d.to_pt() / PT_PER_INCH);
    (alignment, indent)
}
