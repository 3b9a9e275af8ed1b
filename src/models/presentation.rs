use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::page::Page;

/// A slide deck held by the layout service.
///
/// Mirrors the shape of the Slides REST resource: slides are pages, and every
/// geometric value on them is stored in EMU.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The ID of the presentation.
    pub presentation_id: String,

    /// The size of pages in the presentation.
    pub page_size: Option<Size>,

    /// The slides in the presentation, in display order.
    pub slides: Option<Vec<Page>>,

    /// The title of the presentation.
    pub title: Option<String>,

    /// The locale of the presentation, as an IETF BCP 47 language tag (e.g., "en-US").
    pub locale: Option<String>,

    /// Bumped on every mutation made through the editor. Opaque to callers.
    pub revision_id: Option<String>,
}

impl Presentation {
    pub fn new(presentation_id: impl Into<String>, page_size: Size) -> Self {
        Self {
            presentation_id: presentation_id.into(),
            page_size: Some(page_size),
            slides: Some(Vec::new()),
            title: None,
            locale: None,
            revision_id: None,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.as_ref().map_or(0, Vec::len)
    }

    pub fn slides(&self) -> &[Page] {
        self.slides.as_deref().unwrap_or(&[])
    }

    pub fn slides_mut(&mut self) -> &mut Vec<Page> {
        self.slides.get_or_insert_with(Vec::new)
    }
}
