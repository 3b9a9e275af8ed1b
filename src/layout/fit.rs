//! Best-fit font size estimation.
//!
//! A character-count heuristic, not glyph measurement: the text is assumed to
//! average a fixed number of characters per inch (wider for large formatted
//! text), wrapped into lines of a fixed height. The goal is to avoid gross
//! overflow, not to reproduce the renderer's line breaks.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::FitCalibration;

/// Style facts about the text that change its estimated width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitHints {
    /// Any bold, italic, underline or monospace span is present.
    pub formatted: bool,
    /// The text is a list; each line loses width to the bullet and indent.
    pub bullets: bool,
}

impl FitHints {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn formatted() -> Self {
        Self {
            formatted: true,
            bullets: false,
        }
    }

    pub fn list(formatted: bool) -> Self {
        Self {
            formatted,
            bullets: true,
        }
    }
}

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"</?u>|[*_`~]").expect("marker pattern is valid"))
}

/// Removes inline formatting markers so only visible characters are counted.
pub fn strip_markers(text: &str) -> String {
    marker_pattern().replace_all(text, "").into_owned()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Sizes below the calibrated minimum are raised to it.
fn effective_max(calibration: &FitCalibration, max_size: f64) -> f64 {
    if max_size.is_finite() {
        max_size.max(calibration.min_font_size)
    } else {
        calibration.min_font_size
    }
}

fn chars_per_inch(calibration: &FitCalibration, size: f64, hints: FitHints) -> f64 {
    let base = if hints.formatted {
        calibration
            .formatted_widths
            .iter()
            .find(|step| size >= step.min_size)
            .map_or(calibration.plain_chars_per_inch, |step| step.chars_per_inch)
    } else {
        calibration.plain_chars_per_inch
    };
    if hints.bullets {
        base * (1.0 - calibration.bullet_width_penalty)
    } else {
        base
    }
}

/// Characters that fit on one line of a `width`-inch box at `size` points.
pub fn chars_per_line(calibration: &FitCalibration, width: f64, size: f64, hints: FitHints) -> f64 {
    let usable = finite_or_zero(width - calibration.horizontal_margin);
    let scale = size / calibration.baseline_size;
    (usable * chars_per_inch(calibration, size, hints) / scale).max(1.0)
}

/// Height of one line at `size` points, in inches.
pub fn line_height(calibration: &FitCalibration, size: f64, hints: FitHints) -> f64 {
    let bonus = if hints.formatted || hints.bullets {
        1.0 + calibration.formatted_line_height_bonus
    } else {
        1.0
    };
    calibration.baseline_line_height * (size / calibration.baseline_size) * bonus
}

/// Estimated line count of `text` wrapped into a `width`-inch box.
///
/// Each `\n`-separated paragraph takes at least one line.
pub fn estimated_lines(
    calibration: &FitCalibration,
    text: &str,
    width: f64,
    size: f64,
    hints: FitHints,
) -> f64 {
    let clean = strip_markers(text);
    let per_line = chars_per_line(calibration, width, size, hints);
    clean
        .split('\n')
        .map(|paragraph| (paragraph.chars().count() as f64 / per_line).max(1.0))
        .sum()
}

/// True when `text` is estimated to fit a `width` x `height` box at `size`.
pub fn fits(
    calibration: &FitCalibration,
    text: &str,
    width: f64,
    height: f64,
    size: f64,
    hints: FitHints,
) -> bool {
    let usable_height = finite_or_zero(height - calibration.vertical_margin);
    let max_lines = usable_height / line_height(calibration, size, hints);
    estimated_lines(calibration, text, width, size, hints) <= max_lines
}

/// The largest whole font size, between the calibrated minimum and
/// `max_size`, at which `text` is estimated to fit the box.
///
/// The proportional shrink `max * (room / lines) * safety` is only the first
/// guess; the result is then walked to the largest whole size that still
/// fits, so a larger `max_size` never yields a smaller size.
pub fn estimate(
    calibration: &FitCalibration,
    text: &str,
    width: f64,
    height: f64,
    max_size: f64,
    hints: FitHints,
) -> u32 {
    let max_size = effective_max(calibration, max_size);
    let min_size = calibration.min_font_size;

    if text.trim().is_empty() || fits(calibration, text, width, height, max_size, hints) {
        return max_size as u32;
    }

    let usable_height = finite_or_zero(height - calibration.vertical_margin);
    let max_lines = usable_height / line_height(calibration, max_size, hints);
    let lines = estimated_lines(calibration, text, width, max_size, hints);
    let candidate = max_size * (max_lines / lines) * calibration.safety_factor;
    let guess = if candidate.is_finite() {
        candidate.clamp(min_size, max_size)
    } else {
        min_size
    };

    let floor = min_size as u32;
    let ceiling = max_size as u32;
    let fits_at = |size: u32| fits(calibration, text, width, height, f64::from(size), hints);
    let mut size = (guess as u32).clamp(floor, ceiling);
    if fits_at(size) {
        while size < ceiling && fits_at(size + 1) {
            size += 1;
        }
    } else {
        while size > floor && !fits_at(size) {
            size -= 1;
        }
    }
    log::debug!(
        "Shrinking {} chars from {}pt to {}pt ({:.1} lines, room for {:.1}, first guess {:.1})",
        text.chars().count(),
        max_size,
        size,
        lines,
        max_lines,
        guess
    );
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn calibration() -> FitCalibration {
        FitCalibration::default()
    }

    #[test]
    fn long_bold_title_in_small_box_is_shrunk() {
        let title = "Quarterly Revenue Growth Chart";
        assert_eq!(title.chars().count(), 30);
        let size = estimate(&calibration(), title, 4.0, 1.0, 32.0, FitHints::formatted());
        assert!(size < 32, "expected a shrink, got {}", size);
        assert!(size >= 8);
    }

    #[test]
    fn short_text_keeps_max_size() {
        let size = estimate(&calibration(), "Hello", 9.0, 1.0, 32.0, FitHints::formatted());
        assert_eq!(size, 32);
    }

    #[test]
    fn empty_text_keeps_max_size() {
        assert_eq!(estimate(&calibration(), "", 1.0, 0.1, 24.0, FitHints::plain()), 24);
    }

    #[test]
    fn max_below_minimum_is_raised() {
        assert_eq!(estimate(&calibration(), "x", 9.0, 5.0, 4.0, FitHints::plain()), 8);
    }

    #[test]
    fn degenerate_boxes_fall_back_to_minimum() {
        let text = "some words that will not fit anywhere";
        assert_eq!(estimate(&calibration(), text, 0.0, 0.0, 18.0, FitHints::plain()), 8);
        assert_eq!(estimate(&calibration(), text, f64::NAN, 2.0, 18.0, FitHints::plain()), 8);
    }

    #[test]
    fn markers_do_not_count_as_characters() {
        assert_eq!(strip_markers("**bold** and <u>under</u> `code`"), "bold and under code");
    }

    #[test]
    fn bullets_lose_width() {
        let c = calibration();
        let plain = chars_per_line(&c, 5.2, 18.0, FitHints::plain());
        let bullets = chars_per_line(&c, 5.2, 18.0, FitHints::list(false));
        assert!((plain - 40.0).abs() < 1e-9);
        assert!((bullets - 32.0).abs() < 1e-9);
    }

    #[test]
    fn every_paragraph_takes_a_line() {
        let lines = estimated_lines(&calibration(), "a\nb\n\nc", 9.0, 18.0, FitHints::plain());
        assert_eq!(lines, 4.0);
    }

    #[test]
    fn larger_allowance_never_shrinks_the_title() {
        let c = calibration();
        let title = "Quarterly Revenue Growth Chart";
        let sizes: Vec<u32> = [16.0, 20.0, 24.0, 28.0, 32.0]
            .iter()
            .map(|&max| estimate(&c, title, 4.0, 1.0, max, FitHints::formatted()))
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "sizes {:?}", sizes);
        assert!(sizes[4] < 32);
        assert!(fits(&c, title, 4.0, 1.0, f64::from(sizes[4]), FitHints::formatted()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_estimate_stays_within_bounds(
            text in ".{0,400}",
            width in 0.0f64..12.0,
            height in 0.0f64..8.0,
            max_size in 8u32..72,
            formatted in any::<bool>(),
            bullets in any::<bool>(),
        ) {
            let hints = FitHints { formatted, bullets };
            let size = estimate(&calibration(), &text, width, height, f64::from(max_size), hints);
            prop_assert!(size >= 8);
            prop_assert!(size <= max_size);
        }

        #[test]
        fn prop_larger_max_never_returns_smaller_size(
            text in "[a-zA-Z ]{0,300}",
            width in 0.0f64..12.0,
            height in 0.0f64..8.0,
            smaller in 8u32..72,
            step in 1u32..40,
            formatted in any::<bool>(),
            bullets in any::<bool>(),
        ) {
            let c = calibration();
            let hints = FitHints { formatted, bullets };
            let larger = smaller + step;
            let a = estimate(&c, &text, width, height, f64::from(smaller), hints);
            let b = estimate(&c, &text, width, height, f64::from(larger), hints);
            prop_assert!(a <= b, "max {} -> {}, max {} -> {}", smaller, a, larger, b);
        }

        #[test]
        fn prop_fitting_text_still_fits_at_smaller_sizes(
            text in "[a-zA-Z ]{1,300}",
            width in 0.5f64..12.0,
            height in 0.2f64..8.0,
            larger in 9u32..72,
            step in 1u32..40,
            formatted in any::<bool>(),
            bullets in any::<bool>(),
        ) {
            let c = calibration();
            let hints = FitHints { formatted, bullets };
            let smaller = larger.saturating_sub(step).max(8);
            if fits(&c, &text, width, height, f64::from(larger), hints) {
                prop_assert!(fits(&c, &text, width, height, f64::from(smaller), hints));
                prop_assert_eq!(
                    estimate(&c, &text, width, height, f64::from(smaller), hints),
                    smaller
                );
            }
        }
    }
}
