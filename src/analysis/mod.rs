//! Post-layout validation of slide geometry.

pub mod geometry;

pub use geometry::{
    analyze, overlap, BoundaryStatus, Edge, EdgeOverflow, ElementGeometry, GeometryReport,
    GeometrySummary, Overlap, Severity,
};

use crate::config::LayoutConfig;
use crate::models::presentation::Presentation;
use crate::units::emu_to_inches;

/// Canvas size in inches: the presentation's page size when it has a
/// usable one, the configured canvas otherwise.
pub fn canvas_size(presentation: &Presentation, config: &LayoutConfig) -> (f64, f64) {
    let from_page = presentation.page_size.as_ref().and_then(|size| {
        let width = emu_to_inches(size.width.as_ref()?.to_emu());
        let height = emu_to_inches(size.height.as_ref()?.to_emu());
        (width > 0.0 && height > 0.0).then_some((width, height))
    });
    from_page.unwrap_or((config.canvas_width, config.canvas_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Size;

    #[test]
    fn page_size_wins_over_config() {
        let config = LayoutConfig::default();
        let wide = Presentation::new("p", Size::emu(12192000.0, 6858000.0));
        let (width, height) = canvas_size(&wide, &config);
        assert!((width - 13.333).abs() < 1e-3);
        assert_eq!(height, 7.5);

        let mut unsized_deck = wide.clone();
        unsized_deck.page_size = None;
        assert_eq!(canvas_size(&unsized_deck, &config), (10.0, 7.5));
    }
}
