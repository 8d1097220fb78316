// src/suggester.rs

use std::collections::BTreeSet;

use regex::Regex;
use tracing::{debug, error};

use crate::aggregate::{accumulate, merge_weights};
use crate::blame::resolve_blame;
use crate::eligibility::{change_eligible, file_eligible};
use crate::engines::{AccountDirectory, BlameEngine, DiffEngine, IdentityResolver, ReviewClient};
use crate::model::{AccountId, Change, RevisionCommit, WeightMap};

/// Drives one change end-to-end: diff, eligibility, blame, accumulation,
/// top-K selection, submission. One instance per change; it owns its
/// weight map exclusively and shares no state with other runs.
pub struct ReviewerSuggester<'a> {
    commit: RevisionCommit,
    change: Change,
    max_reviewers: usize,
    ignore_file_regex: Option<Regex>,
    diff: &'a dyn DiffEngine,
    blame: &'a dyn BlameEngine,
    identities: &'a dyn IdentityResolver,
    accounts: &'a dyn AccountDirectory,
    review: &'a dyn ReviewClient,
}

impl<'a> ReviewerSuggester<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        commit: RevisionCommit,
        change: Change,
        max_reviewers: usize,
        ignore_file_regex: Option<Regex>,
        diff: &'a dyn DiffEngine,
        blame: &'a dyn BlameEngine,
        identities: &'a dyn IdentityResolver,
        accounts: &'a dyn AccountDirectory,
        review: &'a dyn ReviewClient,
    ) -> Self {
        Self {
            commit,
            change,
            max_reviewers,
            ignore_file_regex,
            diff,
            blame,
            identities,
            accounts,
            review,
        }
    }

    /// Runs the whole pipeline and returns the selected reviewers. The
    /// selection is also submitted through the review client; a failed
    /// submission is logged but does not fail the run.
    pub fn run(&self) -> BTreeSet<AccountId> {
        // Ignore merges and the initial commit.
        if !change_eligible(&self.commit) {
            debug!(
                change = %self.change.id,
                parents = self.commit.parent_count(),
                "not a single-parent commit, skipping change"
            );
            return BTreeSet::new();
        }
        let Some(parent) = self.commit.first_parent() else {
            return BTreeSet::new();
        };

        let files = match self
            .diff
            .list_modified_files(&self.change.project, &self.commit.id, parent)
        {
            Ok(files) => files,
            Err(err) => {
                error!(change = %self.change.id, error = %err, "could not load diff, skipping change");
                return BTreeSet::new();
            }
        };

        let mut weights = WeightMap::new();
        for entry in files.values() {
            if !file_eligible(entry, self.ignore_file_regex.as_ref()) {
                debug!(path = entry.display_path(), "file not eligible for blame");
                continue;
            }
            let Some(attribution) = resolve_blame(self.blame, entry, parent) else {
                continue;
            };
            let delta = accumulate(
                &entry.edits,
                &attribution,
                self.change.owner,
                self.identities,
                self.accounts,
            );
            merge_weights(&mut weights, delta);
        }

        let top = crate::select::select_top(&weights, self.max_reviewers);
        if let Err(err) = self.review.add_reviewers(&self.change.id, &top) {
            error!(change = %self.change.id, error = %err, "could not add reviewers to the change");
        }
        top
    }
}
