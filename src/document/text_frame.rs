//! Paragraph and run specifications, and their conversion into the
//! `TextContent` element stream.

use crate::models::colors::{OptionalColor, RgbColor};
use crate::models::common::Dimension;
use crate::models::link::Link;
use crate::models::properties::{Alignment, ParagraphStyle, TextStyle};
use crate::models::text::TextContent;
use crate::models::text_element::{ParagraphMarker, TextElement, TextElementKind, TextRun};
use crate::units::PT_PER_INCH;

/// One styled run of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSpec {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub link: Option<String>,
    pub color: Option<RgbColor>,
}

impl RunSpec {
    fn to_style(&self) -> TextStyle {
        let flag = |on: bool| on.then_some(true);
        TextStyle {
            foreground_color: self.color.clone().map(OptionalColor::rgb),
            font_family: Some(self.font_family.clone()),
            font_size: Some(Dimension::pt(self.font_size)),
            bold: flag(self.bold),
            italic: flag(self.italic),
            underline: flag(self.underline),
            strikethrough: flag(self.strikethrough),
            link: self.link.clone().map(|url| Link { url: Some(url) }),
        }
    }
}

/// One paragraph: its runs plus alignment and indentation (inches).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphSpec {
    pub runs: Vec<RunSpec>,
    pub alignment: Option<Alignment>,
    pub indent_start: f64,
}

impl ParagraphSpec {
    pub fn new(alignment: Option<Alignment>) -> Self {
        Self {
            runs: Vec::new(),
            alignment,
            indent_start: 0.0,
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

fn utf16_len(text: &str) -> i32 {
    i32::try_from(text.encode_utf16().count()).unwrap_or(i32::MAX)
}

/// Builds the element stream: a marker per paragraph followed by its runs,
/// with the paragraph's closing `\n` carried by its last run.
pub fn build_text_content(paragraphs: &[ParagraphSpec]) -> TextContent {
    let mut elements = Vec::new();
    let mut offset = 0i32;

    for paragraph in paragraphs {
        let mut runs: Vec<(String, TextStyle)> = paragraph
            .runs
            .iter()
            .filter(|r| !r.text.is_empty())
            .map(|r| (r.text.clone(), r.to_style()))
            .collect();
        match runs.last_mut() {
            Some((text, _)) => text.push('\n'),
            None => {
                let style = paragraph.runs.first().map(RunSpec::to_style);
                runs.push(("\n".to_string(), style.unwrap_or_default()));
            }
        }

        let paragraph_len: i32 = runs.iter().map(|(t, _)| utf16_len(t)).sum();
        let indent = (paragraph.indent_start > 0.0)
            .then(|| Dimension::pt(paragraph.indent_start * PT_PER_INCH));
        elements.push(TextElement {
            start_index: Some(offset),
            end_index: Some(offset + paragraph_len),
            kind: TextElementKind::ParagraphMarker(ParagraphMarker {
                style: Some(ParagraphStyle {
                    alignment: paragraph.alignment.clone(),
                    indent_start: indent.clone(),
                    indent_first_line: indent,
                    ..ParagraphStyle::default()
                }),
            }),
        });

        for (text, style) in runs {
            let len = utf16_len(&text);
            elements.push(TextElement {
                start_index: Some(offset),
                end_index: Some(offset + len),
                kind: TextElementKind::TextRun(TextRun {
                    content: Some(text),
                    style: Some(style),
                }),
            });
            offset += len;
        }
    }

    TextContent {
        text_elements: Some(elements),
    }
}
