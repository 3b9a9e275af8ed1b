//! Slide decks built from markup with automatic, overflow-aware layout.
//!
//! Markup is parsed into blocks ([`markup`]), each block is fitted and
//! placed on a slide ([`layout`]), and the result can be checked for
//! off-canvas or overlapping shapes ([`analysis`]). [`service`] exposes it
//! all as named JSON actions over stored presentations.

pub mod analysis;
pub mod config;
pub mod converters;
pub mod document;
pub mod edit;
pub mod errors;
pub mod layout;
pub mod logging;
pub mod markup;
pub mod models;
pub mod service;
pub mod units;
pub mod wasm;

pub use config::LayoutConfig;
pub use converters::markdown;
pub use errors::{Result, SlidesError};
pub use models::presentation::Presentation;
pub use service::{dispatch, InMemoryStore, PresentationStore, SlideService};
