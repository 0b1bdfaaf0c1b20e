//! Languages a document can be written in.

use crate::kind::FeatureKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The language of a document's text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLanguage {
    /// HTML markup.
    Html,
    /// JavaScript, classic or module.
    #[serde(rename = "js")]
    JavaScript,
    /// CSS stylesheets.
    Css,
}

impl DocumentLanguage {
    /// Returns the short name (`"html"`, `"js"`, `"css"`).
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentLanguage::Html => "html",
            DocumentLanguage::JavaScript => "js",
            DocumentLanguage::Css => "css",
        }
    }

    /// Returns the `<lang>-document` kind tag for documents in this language.
    pub fn document_kind(self) -> FeatureKind {
        match self {
            DocumentLanguage::Html => FeatureKind::HtmlDocument,
            DocumentLanguage::JavaScript => FeatureKind::JsDocument,
            DocumentLanguage::Css => FeatureKind::CssDocument,
        }
    }

    /// Guesses the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" | "xhtml" => Some(DocumentLanguage::Html),
            "js" | "mjs" | "cjs" => Some(DocumentLanguage::JavaScript),
            "css" => Some(DocumentLanguage::Css),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
