//! Mutations of existing slide content.

pub mod modify;
pub mod refit;
pub mod replace;

pub use modify::{modify_element, CellUpdate, ModifyOutcome, PositionUpdate};
pub use refit::{refit_runs, replace_in_runs, TextTemplate};
pub use replace::{
    find_and_replace, scan, AppliedReplacement, BlockedReplacement, MatchLocation,
    ReplaceInstruction, ReplaceOutcome,
};
