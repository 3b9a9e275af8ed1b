// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::PageElement;

/// The type of the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    /// The page type is unspecified or unknown.
    #[default]
    PageTypeUnspecified,
    /// A slide page.
    Slide,
    /// A layout page.
    Layout,
}

/// A page in a presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The object ID for this page. Object IDs used by Page and PageElement share
    /// the same namespace.
    pub object_id: String,

    /// The type of the page.
    #[serde(default)]
    pub page_type: Option<PageType>,

    /// The page elements rendered on the page, in z-order.
    pub page_elements: Option<Vec<PageElement>>,
}

impl Page {
    pub fn new_slide(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            page_type: Some(PageType::Slide),
            page_elements: Some(Vec::new()),
        }
    }

    pub fn elements(&self) -> &[PageElement] {
        self.page_elements.as_deref().unwrap_or(&[])
    }

    pub fn elements_mut(&mut self) -> &mut Vec<PageElement> {
        self.page_elements.get_or_insert_with(Vec::new)
    }
}
