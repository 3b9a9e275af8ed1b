/// Vertical offset, in inches, where the next block on a slide goes.
///
/// Values are handed back and forth between placement calls rather than
/// shared, so one cursor belongs to exactly one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LayoutCursor(f64);

impl LayoutCursor {
    pub fn at(top: f64) -> Self {
        Self(top)
    }

    pub fn top(self) -> f64 {
        self.0
    }

    /// The cursor below a block of `height` plus its trailing `gap`.
    pub fn advance(self, height: f64, gap: f64) -> Self {
        Self(self.0 + height.max(0.0) + gap.max(0.0))
    }

    /// Moves down to `offset` if the cursor is above it.
    pub fn anchor(self, offset: f64) -> Self {
        Self(self.0.max(offset))
    }
}
