//! The resolution pass: scanned features in, features and warnings out.

use crate::document::Document;
use crate::feature::Feature;
use crate::scanned::ScannedFeature;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use vellum_diagnostics::Warning;

/// How [`resolve_all`] schedules work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Resolve one feature after another on the calling thread.
    #[default]
    Sequential,
    /// Resolve features on the rayon thread pool.
    Parallel,
}

/// Everything a resolution pass produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Resolved features, in the order of the scanned input.
    pub features: Vec<Feature>,
    /// Warnings for scanned features that failed to resolve, in input order.
    pub warnings: Vec<Warning>,
}

/// Resolves every scanned feature against the finished `document`.
///
/// The document is only read, so in parallel mode it is shared across
/// workers as-is. Either mode yields the same outcome in the same order.
pub fn resolve_all(
    document: &Document,
    scanned: &[ScannedFeature],
    mode: ResolutionMode,
) -> ResolutionOutcome {
    debug!(
        url = %document.url().display(),
        count = scanned.len(),
        ?mode,
        "resolving scanned features"
    );
    let results: Vec<Result<Feature, Warning>> = match mode {
        ResolutionMode::Sequential => scanned.iter().map(|s| s.resolve(document)).collect(),
        ResolutionMode::Parallel => scanned.par_iter().map(|s| s.resolve(document)).collect(),
    };

    let mut outcome = ResolutionOutcome::default();
    for result in results {
        match result {
            Ok(feature) => outcome.features.push(feature),
            Err(warning) => {
                trace!(code = warning.code(), "scanned feature failed to resolve");
                outcome.warnings.push(warning);
            }
        }
    }
    outcome
}
