//! Markup to block-node parsing.
//!
//! Input is CommonMark with tables plus the `__underline__` extension; output
//! is a flat sequence of [`Block`]s, each holding [`Inline`] spans.

mod nodes;
mod parser;
mod underline;

pub use nodes::{has_formatting, plain_text, Block, Inline, ListItem};
pub use parser::{markup_options, parse};
pub use underline::rewrite_underline;
