//! Inline span tree to styled runs.

use crate::config::LayoutConfig;
use crate::document::{ParagraphSpec, RunSpec};
use crate::markup::Inline;
use crate::models::colors::RgbColor;
use crate::models::properties::Alignment;

/// Style inherited down the span tree. One block uses one family, size and
/// color for every run; only the flags and link vary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStyle {
    pub font_family: String,
    pub monospace_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub link: Option<String>,
    pub color: Option<RgbColor>,
}

impl RunStyle {
    pub fn new(font_family: &str, monospace_family: &str, font_size: f64) -> Self {
        Self {
            font_family: font_family.to_string(),
            monospace_family: monospace_family.to_string(),
            font_size,
            bold: false,
            italic: false,
            underline: false,
            link: None,
            color: None,
        }
    }

    /// The configured body and monospace families at `font_size` points.
    pub fn from_config(config: &LayoutConfig, font_size: u32) -> Self {
        Self::new(
            &config.font_family,
            &config.monospace_font_family,
            f64::from(font_size),
        )
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_color(mut self, color: Option<&RgbColor>) -> Self {
        self.color = color.cloned();
        self
    }

    pub fn run(&self, text: &str) -> RunSpec {
        self.run_in(text, &self.font_family)
    }

    fn run_in(&self, text: &str, family: &str) -> RunSpec {
        RunSpec {
            text: text.to_string(),
            font_family: family.to_string(),
            font_size: self.font_size,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: false,
            link: self.link.clone(),
            color: self.color.clone(),
        }
    }
}

/// Appends one run per text leaf of `inlines`, nesting styles on the way down.
pub fn emit_runs(inlines: &[Inline], style: &RunStyle, out: &mut Vec<RunSpec>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push(style.run(text)),
            Inline::Monospace(text) => out.push(style.run_in(text, &style.monospace_family)),
            Inline::Bold(children) => {
                let nested = RunStyle {
                    bold: true,
                    ..style.clone()
                };
                emit_runs(children, &nested, out);
            }
            Inline::Italic(children) => {
                let nested = RunStyle {
                    italic: true,
                    ..style.clone()
                };
                emit_runs(children, &nested, out);
            }
            Inline::Underline(children) => {
                let nested = RunStyle {
                    underline: true,
                    ..style.clone()
                };
                emit_runs(children, &nested, out);
            }
            Inline::Link { url, children } => {
                let nested = RunStyle {
                    link: Some(url.clone()),
                    ..style.clone()
                };
                emit_runs(children, &nested, out);
            }
        }
    }
}

/// One paragraph holding the runs of `inlines`.
pub fn paragraph(
    inlines: &[Inline],
    style: &RunStyle,
    alignment: Option<Alignment>,
) -> ParagraphSpec {
    let mut spec = ParagraphSpec::new(alignment);
    emit_runs(inlines, style, &mut spec.runs);
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> RunStyle {
        RunStyle::new("Calibri", "Courier New", 18.0)
    }

    #[test]
    fn nested_spans_accumulate_flags() {
        let inlines = vec![
            Inline::Text("a ".into()),
            Inline::Bold(vec![
                Inline::Text("b ".into()),
                Inline::Italic(vec![Inline::Underline(vec![Inline::Text("c".into())])]),
            ]),
        ];
        let mut runs = Vec::new();
        emit_runs(&inlines, &style(), &mut runs);

        assert_eq!(runs.len(), 3);
        assert!(!runs[0].bold);
        assert!(runs[1].bold && !runs[1].italic);
        assert!(runs[2].bold && runs[2].italic && runs[2].underline);
        assert!(runs.iter().all(|r| r.font_size == 18.0));
    }

    #[test]
    fn monospace_switches_family_only() {
        let inlines = vec![Inline::Bold(vec![Inline::Monospace("x()".into())])];
        let mut runs = Vec::new();
        emit_runs(&inlines, &style(), &mut runs);
        assert_eq!(runs[0].font_family, "Courier New");
        assert!(runs[0].bold);
    }

    #[test]
    fn color_applies_to_every_run() {
        let red = RgbColor::from_hex("#ff0000");
        let styled = style().with_color(red.as_ref());
        let inlines = vec![
            Inline::Text("a".into()),
            Inline::Link {
                url: "https://example.com".into(),
                children: vec![Inline::Text("b".into())],
            },
        ];
        let spec = paragraph(&inlines, &styled, Some(Alignment::Center));
        assert_eq!(spec.text(), "ab");
        assert!(spec.runs.iter().all(|r| r.color == red));
        assert_eq!(spec.runs[1].link.as_deref(), Some("https://example.com"));
    }
}
