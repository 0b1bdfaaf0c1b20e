//! Configuration types deserialized from `vellum.toml`.

use serde::Deserialize;
use vellum_diagnostics::{PrinterOptions, Verbosity};

/// The top-level configuration parsed from `vellum.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct VellumConfig {
    /// How diagnostics are presented.
    #[serde(default)]
    pub output: OutputConfig,
    /// How documents are discovered and resolved.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// The `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// `"full"` prints underlined source blocks, `"one-line"` only summaries.
    #[serde(default)]
    pub verbosity: Verbosity,
    /// Whether severities and underlines are colourized.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Text or JSON output.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Full,
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl OutputConfig {
    /// Converts the section into printer options.
    pub fn printer_options(&self) -> PrinterOptions {
        PrinterOptions {
            verbosity: self.verbosity,
            color: self.color,
        }
    }
}

/// Diagnostic output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text rendered by the warning printer.
    #[default]
    Text,
    /// A JSON array of warnings.
    Json,
}

/// The `[analysis]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Resolve each document's scanned features on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
    /// File extensions (without the dot) treated as markup documents when
    /// walking a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            extensions: default_extensions(),
        }
    }
}

impl AnalysisConfig {
    /// Returns `true` if `ext` (without the dot) is a configured extension.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = VellumConfig::default();
        assert_eq!(config.output.verbosity, Verbosity::Full);
        assert!(config.output.color);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.analysis.parallel);
        assert_eq!(config.analysis.extensions, vec!["html", "htm"]);
    }

    #[test]
    fn printer_options_follow_section() {
        let output = OutputConfig {
            verbosity: Verbosity::OneLine,
            color: false,
            format: OutputFormat::Text,
        };
        let opts = output.printer_options();
        assert_eq!(opts.verbosity, Verbosity::OneLine);
        assert!(!opts.color);
    }

    #[test]
    fn extension_match_ignores_case() {
        let analysis = AnalysisConfig::default();
        assert!(analysis.matches_extension("HTML"));
        assert!(analysis.matches_extension("htm"));
        assert!(!analysis.matches_extension("js"));
    }
}
