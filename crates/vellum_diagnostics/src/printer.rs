//! Human-readable rendering of warnings to an output stream.
//!
//! In full verbosity a warning renders as:
//!
//! ```text
//!
//!
//!           <script>consol.log('hi')</script>
//!                   ~~~~~~
//!
//! index.html(2,18) warning [undefined-global] - `consol` is not defined
//! ```
//!
//! The summary line alone is what one-line verbosity prints.

use crate::severity::Severity;
use crate::squiggle::squiggle_underline;
use crate::warning::Warning;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, warn};
use vellum_source::{ContentLoader, LoadError, SourceRange};

/// How much each printed warning shows.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Only the summary line.
    #[serde(rename = "one-line")]
    OneLine,
    /// The underlined source block followed by the summary line.
    #[default]
    #[serde(rename = "full")]
    Full,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::OneLine => f.write_str("one-line"),
            Verbosity::Full => f.write_str("full"),
        }
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-line" => Ok(Verbosity::OneLine),
            "full" => Ok(Verbosity::Full),
            other => Err(format!(
                "unknown verbosity '{other}' (expected 'one-line' or 'full')"
            )),
        }
    }
}

/// Presentation settings for a [`WarningPrinter`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PrinterOptions {
    /// Whether to print underlined source blocks.
    pub verbosity: Verbosity,
    /// Whether to paint severities and underlines with ANSI colours.
    pub color: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Full,
            color: true,
        }
    }
}

/// Errors that stop a print operation.
///
/// Problems with individual warnings (no range, unloadable file) never
/// surface here; they degrade that warning's output instead.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// Writing to the output stream failed.
    #[error("failed to write diagnostics: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes warnings to an output stream, pulling source text from a loader.
pub struct WarningPrinter<W, L> {
    out: W,
    loader: L,
    options: PrinterOptions,
}

impl<W: Write, L: ContentLoader> WarningPrinter<W, L> {
    /// Creates a printer writing to `out` and reading file text from `loader`.
    pub fn new(out: W, loader: L, options: PrinterOptions) -> Self {
        Self {
            out,
            loader,
            options,
        }
    }

    /// Returns the options this printer was created with.
    pub fn options(&self) -> PrinterOptions {
        self.options
    }

    /// Consumes the printer and returns the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints each warning in order and returns how many were printed.
    ///
    /// Callers wanting a particular order (by file, then line) sort first.
    pub fn print_warnings<'a, I>(&mut self, warnings: I) -> Result<usize, PrintError>
    where
        I: IntoIterator<Item = &'a Warning>,
    {
        let mut count = 0;
        for warning in warnings {
            self.print_warning(warning)?;
            count += 1;
        }
        debug!(count, "printed warnings");
        Ok(count)
    }

    /// Prints a single warning.
    pub fn print_warning(&mut self, warning: &Warning) -> Result<(), PrintError> {
        let text = self.render(warning);
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Renders a warning exactly as [`print_warning`](Self::print_warning)
    /// would write it.
    pub fn render(&self, warning: &Warning) -> String {
        let Some(range) = warning.source_range() else {
            warn!(code = warning.code(), "warning has no source range");
            return format!(
                "{}{}\n",
                missing_range_notice(warning.code()),
                self.summary_line(warning)
            );
        };

        let mut out = String::new();
        if self.options.verbosity == Verbosity::Full {
            match self.underlined_text(range, Some(warning.severity())) {
                Ok(block) => {
                    out.push_str("\n\n");
                    out.push_str(&block);
                    out.push_str("\n\n");
                }
                Err(err) => {
                    warn!(error = %err, "falling back to summary line");
                }
            }
        }
        out.push_str(&self.summary_line(warning));
        out.push('\n');
        out
    }

    /// Returns the one-line summary of a warning, without a trailing newline.
    ///
    /// `file(line,column) severity [code] - message` with zero-based
    /// coordinates. Without a range the location is left out.
    pub fn summary_line(&self, warning: &Warning) -> String {
        let severity = self.paint(warning.severity(), warning.severity().as_str());
        match warning.source_range() {
            Some(range) => format!(
                "{}({},{}) {} [{}] - {}",
                range.file.display(),
                range.start.line,
                range.start.column,
                severity,
                warning.code(),
                warning.message()
            ),
            None => format!(
                "{} [{}] - {}",
                severity,
                warning.code(),
                warning.message()
            ),
        }
    }

    /// Returns the source lines `range` spans, each followed by its
    /// underline. Underlines are painted in the colour of `severity` when
    /// colour is enabled; `None` leaves them plain.
    pub fn underlined_text(
        &self,
        range: &SourceRange,
        severity: Option<Severity>,
    ) -> Result<String, LoadError> {
        let lines = self
            .loader
            .lines(&range.file, range.start.line, range.end.line)?;
        if lines.is_empty() {
            return Err(LoadError::Unavailable {
                path: range.file.clone(),
                reason: format!("line {} is past the end of the file", range.start.line),
            });
        }
        let mut output = Vec::with_capacity(lines.len() * 2);
        for (line_num, line) in (range.start.line..).zip(&lines) {
            let squiggle = squiggle_underline(line, line_num, range);
            output.push(line.clone());
            output.push(match severity {
                Some(severity) => self.paint(severity, &squiggle),
                None => squiggle,
            });
        }
        Ok(output.join("\n"))
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if self.options.color {
            severity.colour().paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// The notice printed ahead of a warning that arrived without a range.
pub fn missing_range_notice(code: &str) -> String {
    format!(
        "INTERNAL ERROR: Tried to print a '{code}' warning without a source range. \
         Please report this!\n"
    )
}
