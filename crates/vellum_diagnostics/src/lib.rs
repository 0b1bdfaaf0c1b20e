//! Warnings, severities, and the squiggle-underline diagnostic printer.
//!
//! A [`Warning`] is plain data produced while scanning or resolving a
//! document. The [`WarningPrinter`] turns warnings into text: a grep-able
//! summary line, optionally preceded by the offending source lines with
//! `~` underlines computed by [`squiggle_underline`].

#![warn(missing_docs)]

pub mod printer;
pub mod severity;
pub mod squiggle;
pub mod warning;

pub use printer::{missing_range_notice, PrintError, PrinterOptions, Verbosity, WarningPrinter};
pub use severity::{Severity, UnknownSeverity};
pub use squiggle::squiggle_underline;
pub use warning::Warning;
