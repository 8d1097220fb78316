// src/engines.rs
//
// Collaborator seams of the suggester. Everything the core needs from the
// outside world comes in through these traits, so the aggregation logic can
// be driven by the git2 backends, by a review-server integration, or by
// in-memory fakes in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use thiserror::Error;

use crate::model::{Account, AccountId, BlameAttribution, FileDiffEntry};

/// The diff for a change could not be produced at all. This is the one
/// whole-change fatal condition a diff engine may report.
#[derive(Debug, Error)]
#[error("diff not available: {0}")]
pub struct DiffNotAvailable(pub String);

/// Failures of a blame computation for a single file
#[derive(Debug, Error)]
pub enum BlameError {
    #[error("blame failed: {0}")]
    Vcs(#[from] git2::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An identity lookup that could not complete
#[derive(Debug, Error)]
#[error("identity lookup for {email} failed: {source}")]
pub struct IdentityError {
    pub email: String,
    #[source]
    pub source: io::Error,
}

/// Submission of the reviewer list failed
#[derive(Debug, Error)]
#[error("could not add reviewers to change {change}: {reason}")]
pub struct ReviewError {
    pub change: String,
    pub reason: String,
}

/// Produces the file-level diff of a patch set against a base revision.
pub trait DiffEngine {
    fn list_modified_files(
        &self,
        project: &str,
        patchset_rev: &str,
        base_rev: &str,
    ) -> Result<BTreeMap<String, FileDiffEntry>, DiffNotAvailable>;
}

/// Computes per-line attribution for one file at one revision.
pub trait BlameEngine {
    fn blame(&self, start_rev: &str, file_path: &str) -> Result<BlameAttribution, BlameError>;
}

/// Maps an author email to the platform accounts registered for it.
/// The same email may legitimately resolve to several accounts.
pub trait IdentityResolver {
    fn accounts_for_email(&self, email: &str) -> Result<BTreeSet<AccountId>, IdentityError>;
}

/// Looks up full account records by id.
pub trait AccountDirectory {
    fn get_account(&self, id: AccountId) -> Option<Account>;
}

/// Hands the final reviewer list to the review system. Best effort:
/// the suggester logs a failure and moves on.
pub trait ReviewClient {
    fn add_reviewers(
        &self,
        change_id: &str,
        reviewers: &BTreeSet<AccountId>,
    ) -> Result<(), ReviewError>;
}
