// src/blame.rs

use tracing::error;

use crate::engines::BlameEngine;
use crate::model::{BlameAttribution, FileDiffEntry};

/// Runs the blame engine for one file against the parent revision. We are
/// not interested in the patch set commit itself but in its parent, since
/// we want the last person who touched the lines before this change.
///
/// Any engine failure degrades gracefully: the failure is logged and the
/// file simply contributes no attribution.
pub fn resolve_blame(
    engine: &dyn BlameEngine,
    entry: &FileDiffEntry,
    parent_rev: &str,
) -> Option<BlameAttribution> {
    // Eligibility guarantees the file exists in the parent commit, so the
    // old path is set for every entry that reaches this point.
    let path = entry.old_path.as_deref()?;
    match engine.blame(parent_rev, path) {
        Ok(attribution) => Some(attribution),
        Err(err) => {
            error!(parent_rev, path, error = %err, "could not compute blame, skipping file");
            None
        }
    }
}
