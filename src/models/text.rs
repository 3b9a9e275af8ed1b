// src/models/text.rs

use serde::{Deserialize, Serialize};

use crate::models::properties::TextStyle;
use crate::models::text_element::{TextElement, TextElementKind};

/// Represents the textual content of a Shape or TableCell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// The text contents broken down into paragraph markers and styled runs.
    pub text_elements: Option<Vec<TextElement>>,
}

impl TextContent {
    pub fn elements(&self) -> &[TextElement] {
        self.text_elements.as_deref().unwrap_or(&[])
    }

    /// Concatenated run contents. Paragraphs are separated by the `\n` each
    /// paragraph's last run carries.
    pub fn plain_text(&self) -> String {
        self.elements()
            .iter()
            .filter_map(|element| match &element.kind {
                TextElementKind::TextRun(run) => run.content.as_deref(),
                _ => None,
            })
            .collect()
    }

    /// Recomputes `start_index`/`end_index` (UTF-16 offsets) after run
    /// contents changed. A paragraph marker spans the runs up to the next
    /// marker.
    pub fn reindex(&mut self) {
        let Some(elements) = self.text_elements.as_mut() else {
            return;
        };
        let lengths: Vec<Option<i32>> = elements
            .iter()
            .map(|element| match &element.kind {
                TextElementKind::TextRun(run) => {
                    Some(utf16_len(run.content.as_deref().unwrap_or("")))
                }
                TextElementKind::ParagraphMarker(_) => None,
            })
            .collect();

        let mut offset = 0i32;
        for (i, element) in elements.iter_mut().enumerate() {
            let len = match lengths[i] {
                Some(len) => len,
                None => lengths[i + 1..].iter().map_while(|len| *len).sum(),
            };
            element.start_index = Some(offset);
            element.end_index = Some(offset + len);
            if lengths[i].is_some() {
                offset += len;
            }
        }
    }

    /// Style of the first text run, used as the template when text is rewritten.
    pub fn first_run_style(&self) -> Option<&TextStyle> {
        self.elements().iter().find_map(|element| match &element.kind {
            TextElementKind::TextRun(run) => run.style.as_ref(),
            _ => None,
        })
    }
}

fn utf16_len(text: &str) -> i32 {
    i32::try_from(text.encode_utf16().count()).unwrap_or(i32::MAX)
}
