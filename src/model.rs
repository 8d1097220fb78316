// src/model.rs

use std::collections::HashMap;
use std::fmt;

/// Uniquely identifies a platform account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposed modification under review, owned by one account
#[derive(Debug, Clone)]
pub struct Change {
    pub id: String,
    pub project: String,
    pub owner: AccountId,
}

/// The commit of the patch set under review
#[derive(Debug, Clone)]
pub struct RevisionCommit {
    pub id: String,
    /// Parent commit ids in order; 0 = root commit, >1 = merge
    pub parents: Vec<String>,
}

impl RevisionCommit {
    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// How a file changed between the base revision and the patch set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

/// A contiguous span of replaced lines. Both ranges are half-open and
/// zero-based; the old range is what blame attribution is walked over,
/// the new range is kept for completeness only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub begin_old: usize,
    pub end_old: usize,
    pub begin_new: usize,
    pub end_new: usize,
}

/// One file-level entry of a change's diff
#[derive(Debug, Clone)]
pub struct FileDiffEntry {
    /// Present unless the file was added
    pub old_path: Option<String>,
    /// Present unless the file was deleted
    pub new_path: Option<String>,
    pub kind: ChangeKind,
    pub edits: Vec<EditRange>,
}

impl FileDiffEntry {
    pub fn display_path(&self) -> &str {
        self.new_path
            .as_deref()
            .or(self.old_path.as_deref())
            .unwrap_or("")
    }
}

/// Authorship of one old-file line, as reported by the blame engine
#[derive(Debug, Clone)]
pub struct LineOrigin {
    pub commit: String,
    pub author_name: String,
    pub author_email: String,
}

/// Per-line attribution for one file at one revision, keyed by
/// zero-based line index
#[derive(Debug, Clone, Default)]
pub struct BlameAttribution {
    lines: HashMap<usize, LineOrigin>,
}

impl BlameAttribution {
    pub fn insert(&mut self, line: usize, origin: LineOrigin) {
        self.lines.insert(line, origin);
    }

    pub fn line(&self, line: usize) -> Option<&LineOrigin> {
        self.lines.get(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A platform account record
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub active: bool,
}

/// Accumulated line counts per candidate account for one change.
/// Built fresh per run and discarded after selection; an account with
/// no contributing lines is absent, never present with weight 0.
pub type WeightMap = HashMap<AccountId, u32>;
