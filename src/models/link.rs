use serde::{Deserialize, Serialize};

/// A hypertext link on a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// The external web page URL.
    pub url: Option<String>,
}
