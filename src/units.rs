//! Unit conversion constants and the inch-space rectangle used by layout.

use serde::{Deserialize, Serialize};

pub const PT_PER_INCH: f64 = 72.0;
pub const EMU_PER_INCH: f64 = 914400.0;
// EMU (English Metric Unit) per Point (standard 72 DPI)
pub const EMU_PER_PT: f64 = EMU_PER_INCH / PT_PER_INCH;

pub fn inches_to_emu(inches: f64) -> f64 {
    (inches * EMU_PER_INCH).round()
}

pub fn emu_to_inches(emu: f64) -> f64 {
    emu / EMU_PER_INCH
}

/// Rounds to three decimals, the precision reports are given in.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// An axis-aligned box in inches, origin at the slide's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Intersection with another box; `None` unless both extents are strictly positive.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let width = self.right().min(other.right()) - left;
        let height = self.bottom().min(other.bottom()) - top;
        (width > 0.0 && height > 0.0).then(|| Rect::new(left, top, width, height))
    }

    pub fn is_finite(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emu_round_trips_whole_inches() {
        assert_eq!(inches_to_emu(1.0), 914400.0);
        assert_eq!(emu_to_inches(inches_to_emu(7.5)), 7.5);
        assert_eq!(EMU_PER_PT, 12700.0);
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn intersection_is_the_shared_region() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.0, 1.5, 2.0, 2.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(1.0, 1.5, 1.0, 0.5));
        assert_eq!(b.intersection(&a), Some(i));
    }
}
