// src/eligibility.rs

use regex::Regex;

use crate::model::{ChangeKind, FileDiffEntry, RevisionCommit};

/// Whole-change gate: merges and the initial commit have no single parent
/// to blame against, so the change is skipped entirely.
pub fn change_eligible(commit: &RevisionCommit) -> bool {
    commit.parent_count() == 1
}

/// Per-file gates: only modified and deleted files have a parent version
/// worth blaming, and a configured ignore pattern excludes files by their
/// new path. All gates must pass.
pub fn file_eligible(entry: &FileDiffEntry, ignore: Option<&Regex>) -> bool {
    if !matches!(entry.kind, ChangeKind::Modified | ChangeKind::Deleted) {
        return false;
    }
    if let Some(re) = ignore {
        let new_path = entry.new_path.as_deref().unwrap_or("");
        if re.is_match(new_path) {
            return false;
        }
    }
    true
}

/// Compiles the configured ignore pattern. An empty pattern disables the
/// gate; a non-empty one is anchored so it must match the whole path.
/// Invalid patterns are a configuration error, caught at startup rather
/// than per file.
pub fn compile_ignore(pattern: &str) -> Result<Option<Regex>, regex::Error> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("^(?:{pattern})$")).map(Some)
}
