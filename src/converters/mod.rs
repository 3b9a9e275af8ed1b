//! Output formats derived from a presentation.

pub mod markdown;

pub use markdown::extract_text_from_presentation;
