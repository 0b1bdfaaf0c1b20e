//! Feature kind tags used for polymorphic queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tag classifying a [`Feature`](crate::Feature).
///
/// A feature usually carries several tags (an inline script is a
/// `document`, an `inline-document`, and a `js-document`). Known tags are
/// explicit variants; third-party feature kinds fall back to [`Custom`].
///
/// [`Custom`]: FeatureKind::Custom
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureKind {
    /// `"function"`
    Function,
    /// `"import"`
    Import,
    /// `"html-script"`: an external `<script src>` reference.
    HtmlScript,
    /// `"document"`
    Document,
    /// `"inline-document"`
    InlineDocument,
    /// `"html-document"`
    HtmlDocument,
    /// `"js-document"`
    JsDocument,
    /// `"css-document"`
    CssDocument,
    /// `"document-backreference"`
    DocumentBackreference,
    /// Any other tag.
    Custom(String),
}

impl FeatureKind {
    /// Returns the tag's string name.
    pub fn as_str(&self) -> &str {
        match self {
            FeatureKind::Function => "function",
            FeatureKind::Import => "import",
            FeatureKind::HtmlScript => "html-script",
            FeatureKind::Document => "document",
            FeatureKind::InlineDocument => "inline-document",
            FeatureKind::HtmlDocument => "html-document",
            FeatureKind::JsDocument => "js-document",
            FeatureKind::CssDocument => "css-document",
            FeatureKind::DocumentBackreference => "document-backreference",
            FeatureKind::Custom(name) => name,
        }
    }

    /// Maps a tag name to its kind. Unknown names become [`FeatureKind::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "function" => FeatureKind::Function,
            "import" => FeatureKind::Import,
            "html-script" => FeatureKind::HtmlScript,
            "document" => FeatureKind::Document,
            "inline-document" => FeatureKind::InlineDocument,
            "html-document" => FeatureKind::HtmlDocument,
            "js-document" => FeatureKind::JsDocument,
            "css-document" => FeatureKind::CssDocument,
            "document-backreference" => FeatureKind::DocumentBackreference,
            other => FeatureKind::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FeatureKind::from_name(s))
    }
}

impl From<String> for FeatureKind {
    fn from(name: String) -> Self {
        FeatureKind::from_name(&name)
    }
}

impl From<&str> for FeatureKind {
    fn from(name: &str) -> Self {
        FeatureKind::from_name(name)
    }
}

impl From<FeatureKind> for String {
    fn from(kind: FeatureKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_roundtrip() {
        for kind in [
            FeatureKind::Function,
            FeatureKind::Import,
            FeatureKind::HtmlScript,
            FeatureKind::Document,
            FeatureKind::InlineDocument,
            FeatureKind::HtmlDocument,
            FeatureKind::JsDocument,
            FeatureKind::CssDocument,
            FeatureKind::DocumentBackreference,
        ] {
            assert_eq!(FeatureKind::from_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_name_is_custom() {
        let kind: FeatureKind = "polymer-element".into();
        assert_eq!(kind, FeatureKind::Custom("polymer-element".to_string()));
        assert_eq!(kind.to_string(), "polymer-element");
    }

    #[test]
    fn custom_with_known_name_normalizes_through_serde() {
        let json = serde_json::to_string(&FeatureKind::Custom("function".to_string())).unwrap();
        let back: FeatureKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FeatureKind::Function);
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&FeatureKind::DocumentBackreference).unwrap();
        assert_eq!(json, "\"document-backreference\"");
    }
}
