//! Automatic layout of markup onto slides.
//!
//! [`fit`] estimates font sizes, [`runs`] turns inline spans into styled
//! runs, [`placer`] creates one shape per block, [`driver`] stacks a block
//! sequence down a slide and [`outline`] spreads an outline over new slides.

pub mod cursor;
pub mod driver;
pub mod fit;
pub mod outline;
pub mod placer;
pub mod runs;

pub use cursor::LayoutCursor;
pub use driver::{layout_blocks, layout_markup, SkippedBlock, SlideLayout};
pub use fit::{estimate, FitHints};
pub use outline::{build_outline, split_outline, SectionResult};
pub use placer::{BlockPlacer, PlacedShape, Placement};
pub use runs::{emit_runs, RunStyle};
