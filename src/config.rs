//! Tunable layout policy: canvas geometry, block sizing and the text-fit
//! calibration table.
//!
//! Every value has a default, so a partial JSON document only overrides the
//! fields it names. None of the calibration constants are derived from glyph
//! metrics; they are a policy open to recalibration.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::errors::Result;

/// Environment variable naming a JSON file with a [`LayoutConfig`].
pub const CONFIG_ENV_VAR: &str = "SLIDES_LAYOUT_CONFIG";

/// One step of the formatted-text width table: text at or above `min_size`
/// points averages `chars_per_inch` characters per inch of line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidthStep {
    pub min_size: f64,
    pub chars_per_inch: f64,
}

/// Calibration constants of the best-fit font size estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitCalibration {
    /// Smallest size the estimator will ever return.
    pub min_font_size: f64,
    /// Size at which the width and line-height figures below were measured.
    pub baseline_size: f64,
    /// Formatted text widths, checked in order; the first step whose
    /// `min_size` is at or below the requested size applies.
    pub formatted_widths: Vec<WidthStep>,
    /// Characters per inch for text without inline formatting.
    pub plain_chars_per_inch: f64,
    /// Fraction of line width lost to bullet glyphs and indentation.
    pub bullet_width_penalty: f64,
    /// Inches subtracted from box width for internal padding.
    pub horizontal_margin: f64,
    /// Inches subtracted from box height for internal padding.
    pub vertical_margin: f64,
    /// Line height in inches at the baseline size.
    pub baseline_line_height: f64,
    /// Extra line height for formatted or bulleted text.
    pub formatted_line_height_bonus: f64,
    /// Multiplier applied to a shrunk size so the result errs small.
    pub safety_factor: f64,
}

impl Default for FitCalibration {
    fn default() -> Self {
        Self {
            min_font_size: 8.0,
            baseline_size: 18.0,
            formatted_widths: vec![
                WidthStep {
                    min_size: 28.0,
                    chars_per_inch: 3.5,
                },
                WidthStep {
                    min_size: 20.0,
                    chars_per_inch: 4.5,
                },
                WidthStep {
                    min_size: 0.0,
                    chars_per_inch: 5.5,
                },
            ],
            plain_chars_per_inch: 8.0,
            bullet_width_penalty: 0.2,
            horizontal_margin: 0.2,
            vertical_margin: 0.1,
            baseline_line_height: 0.25,
            formatted_line_height_bonus: 0.15,
            safety_factor: 0.9,
        }
    }
}

/// Maximum font sizes per block kind, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizes {
    pub title: f64,
    /// Heading levels 2 through 6, in order.
    pub headings: [f64; 5],
    pub body: f64,
    pub list: f64,
    pub quote: f64,
    pub code: f64,
    pub table_cell: f64,
    pub subtitle: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 32.0,
            headings: [24.0, 20.0, 18.0, 16.0, 14.0],
            body: 18.0,
            list: 18.0,
            quote: 18.0,
            code: 14.0,
            table_cell: 14.0,
            subtitle: 20.0,
        }
    }
}

impl FontSizes {
    /// Max size for a heading of level 2..=6. Deeper levels use the level-6 size.
    pub fn heading(&self, level: u8) -> f64 {
        let index = usize::from(level.clamp(2, 6)) - 2;
        self.headings[index]
    }
}

/// Vertical gap left below each block kind, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockGaps {
    pub heading: f64,
    pub paragraph: f64,
    pub list: f64,
    pub table: f64,
    pub quote: f64,
    pub code: f64,
}

impl Default for BlockGaps {
    fn default() -> Self {
        Self {
            heading: 0.2,
            paragraph: 0.3,
            list: 0.3,
            table: 0.4,
            quote: 0.3,
            code: 0.3,
        }
    }
}

/// Layout policy for one slide deck. All lengths are inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,

    pub font_family: String,
    pub monospace_font_family: String,

    pub font_sizes: FontSizes,
    pub gaps: BlockGaps,
    pub fit: FitCalibration,

    pub title_height: f64,
    /// Cursor position after a level-1 heading, regardless of its height.
    pub title_reserved_offset: f64,
    pub heading_height: f64,
    pub paragraph_min_height: f64,
    pub paragraph_padding: f64,
    pub list_item_height: f64,
    pub list_base_height: f64,
    pub list_indent: f64,
    pub table_row_height: f64,
    pub quote_indent: f64,
    pub code_line_height: f64,
    pub code_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 10.0,
            canvas_height: 7.5,
            margin_left: 0.5,
            margin_right: 0.5,
            margin_top: 0.5,
            margin_bottom: 0.5,
            font_family: "Calibri".to_string(),
            monospace_font_family: "Courier New".to_string(),
            font_sizes: FontSizes::default(),
            gaps: BlockGaps::default(),
            fit: FitCalibration::default(),
            title_height: 1.0,
            title_reserved_offset: 1.75,
            heading_height: 0.6,
            paragraph_min_height: 0.6,
            paragraph_padding: 0.2,
            list_item_height: 0.4,
            list_base_height: 0.5,
            list_indent: 0.375,
            table_row_height: 0.4,
            quote_indent: 0.5,
            code_line_height: 0.25,
            code_padding: 0.3,
        }
    }
}

impl LayoutConfig {
    /// Width available between the side margins.
    pub fn content_width(&self) -> f64 {
        (self.canvas_width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Lowest point flowing content may reach.
    pub fn content_bottom(&self) -> f64 {
        (self.canvas_height - self.margin_bottom).max(0.0)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], or returns the defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                let json = fs::read_to_string(&path)?;
                log::debug!("Loaded layout configuration from '{}'", path);
                Self::from_json_str(&json)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config =
            LayoutConfig::from_json_str(r#"{"canvasWidth": 13.333, "fontSizes": {"title": 40}}"#)
                .unwrap();
        assert_eq!(config.canvas_width, 13.333);
        assert_eq!(config.canvas_height, 7.5);
        assert_eq!(config.font_sizes.title, 40.0);
        assert_eq!(config.font_sizes.body, 18.0);
        assert_eq!(config.fit, FitCalibration::default());
    }

    #[test]
    fn heading_sizes_step_down_by_level() {
        let sizes = FontSizes::default();
        assert_eq!(sizes.heading(2), 24.0);
        assert_eq!(sizes.heading(4), 18.0);
        assert_eq!(sizes.heading(6), 14.0);
        assert_eq!(sizes.heading(9), 14.0);
    }

    #[test]
    fn content_width_excludes_margins() {
        assert_eq!(LayoutConfig::default().content_width(), 9.0);
    }
}
