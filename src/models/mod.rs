//! Serde data model of a slide deck.
//!
//! The layout follows the Slides REST resources: a [`presentation::Presentation`]
//! owns [`page::Page`]s, a page owns [`elements::PageElement`]s positioned by an
//! EMU size and affine transform, and text lives in a
//! [`text::TextContent`] stream of paragraph markers and styled runs.

pub mod chart;
pub mod colors;
pub mod common;
pub mod elements;
pub mod image;
pub mod link;
pub mod page;
pub mod placeholder;
pub mod presentation;
pub mod properties;
pub mod shape;
pub mod table;
pub mod table_properties;
pub mod text;
pub mod text_element;
