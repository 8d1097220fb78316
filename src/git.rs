// src/git.rs
//
// git2-backed diff and blame engines. These drive the suggester against a
// local repository; a review-server integration would supply its own
// implementations of the same traits.

use std::collections::BTreeMap;
use std::path::Path;

use git2::{BlameOptions, Delta, DiffFindOptions, DiffHunk, DiffOptions, Oid, Repository};

use crate::engines::{BlameEngine, BlameError, DiffEngine, DiffNotAvailable};
use crate::model::{BlameAttribution, ChangeKind, EditRange, FileDiffEntry, LineOrigin};

pub struct GitDiffEngine<'r> {
    repo: &'r Repository,
}

impl<'r> GitDiffEngine<'r> {
    pub fn new(repo: &'r Repository) -> Self {
        Self { repo }
    }

    fn diff_trees(
        &self,
        patchset_rev: &str,
        base_rev: &str,
    ) -> Result<BTreeMap<String, FileDiffEntry>, git2::Error> {
        let new_tree = self.repo.find_commit(Oid::from_str(patchset_rev)?)?.tree()?;
        let old_tree = self.repo.find_commit(Oid::from_str(base_rev)?)?.tree()?;

        let mut diff_opts = DiffOptions::new();
        // With zero context lines every hunk covers exactly one edit region,
        // which is what the aggregator walks.
        diff_opts.context_lines(0);
        diff_opts.ignore_filemode(true);
        let mut diff =
            self.repo
                .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut diff_opts))?;
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut files: BTreeMap<String, FileDiffEntry> = BTreeMap::new();
        for delta in diff.deltas() {
            let Some(entry) = file_entry(&delta) else {
                continue;
            };
            files.insert(entry.display_path().to_string(), entry);
        }

        diff.foreach(
            &mut |_, _| true,
            None,
            Some(&mut |delta, hunk| {
                if let Some(key) = delta_path(&delta) {
                    if let Some(entry) = files.get_mut(&key) {
                        entry.edits.push(edit_from_hunk(&hunk));
                    }
                }
                true
            }),
            None,
        )?;

        Ok(files)
    }
}

impl DiffEngine for GitDiffEngine<'_> {
    fn list_modified_files(
        &self,
        _project: &str,
        patchset_rev: &str,
        base_rev: &str,
    ) -> Result<BTreeMap<String, FileDiffEntry>, DiffNotAvailable> {
        self.diff_trees(patchset_rev, base_rev)
            .map_err(|err| DiffNotAvailable(err.message().to_string()))
    }
}

fn file_entry(delta: &git2::DiffDelta<'_>) -> Option<FileDiffEntry> {
    let kind = match delta.status() {
        Delta::Added => ChangeKind::Added,
        Delta::Deleted => ChangeKind::Deleted,
        Delta::Modified => ChangeKind::Modified,
        Delta::Renamed => ChangeKind::Renamed,
        Delta::Copied => ChangeKind::Copied,
        // Typechange, unmodified and friends carry no blameable edits
        _ => return None,
    };
    let old_path = (kind != ChangeKind::Added)
        .then(|| delta.old_file().path())
        .flatten()
        .map(|p| p.to_string_lossy().into_owned());
    let new_path = (kind != ChangeKind::Deleted)
        .then(|| delta.new_file().path())
        .flatten()
        .map(|p| p.to_string_lossy().into_owned());
    Some(FileDiffEntry {
        old_path,
        new_path,
        kind,
        edits: Vec::new(),
    })
}

fn delta_path(delta: &git2::DiffDelta<'_>) -> Option<String> {
    let side = if delta.status() == Delta::Deleted {
        delta.old_file()
    } else {
        delta.new_file()
    };
    side.path().map(|p| p.to_string_lossy().into_owned())
}

fn edit_from_hunk(hunk: &DiffHunk<'_>) -> EditRange {
    // Hunk starts are one-based. A side with zero lines reports the line
    // *before* the region instead, so it already is the zero-based index
    // of the empty range's position.
    let begin_old = if hunk.old_lines() == 0 {
        hunk.old_start() as usize
    } else {
        hunk.old_start() as usize - 1
    };
    let begin_new = if hunk.new_lines() == 0 {
        hunk.new_start() as usize
    } else {
        hunk.new_start() as usize - 1
    };
    EditRange {
        begin_old,
        end_old: begin_old + hunk.old_lines() as usize,
        begin_new,
        end_new: begin_new + hunk.new_lines() as usize,
    }
}

pub struct GitBlameEngine<'r> {
    repo: &'r Repository,
}

impl<'r> GitBlameEngine<'r> {
    pub fn new(repo: &'r Repository) -> Self {
        Self { repo }
    }
}

impl BlameEngine for GitBlameEngine<'_> {
    fn blame(&self, start_rev: &str, file_path: &str) -> Result<BlameAttribution, BlameError> {
        let newest = Oid::from_str(start_rev).map_err(BlameError::Vcs)?;
        let mut opts = BlameOptions::new();
        opts.newest_commit(newest);
        let blame = self.repo.blame_file(Path::new(file_path), Some(&mut opts))?;

        let mut attribution = BlameAttribution::default();
        for hunk in blame.iter() {
            let signature = hunk.final_signature();
            let origin = LineOrigin {
                commit: hunk.final_commit_id().to_string(),
                author_name: signature.name().unwrap_or("").to_string(),
                author_email: signature.email().unwrap_or("").to_string(),
            };
            let start = hunk.final_start_line();
            for offset in 0..hunk.lines_in_hunk() {
                attribution.insert(start - 1 + offset, origin.clone());
            }
        }
        Ok(attribution)
    }
}
