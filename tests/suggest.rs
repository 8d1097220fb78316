// tests/suggest.rs
//
// Drives the git2 engines and the suggester end-to-end over a small
// fixture repository built in a temp directory.

use std::collections::BTreeSet;
use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

use git_reviewers::directory::{AutoDirectory, RosterDirectory, StdoutReviewClient};
use git_reviewers::engines::{AccountDirectory, DiffEngine};
use git_reviewers::git::{GitBlameEngine, GitDiffEngine};
use git_reviewers::model::{AccountId, Change, ChangeKind, RevisionCommit};
use git_reviewers::suggester::ReviewerSuggester;

const BASE: &str = "line one\nline two\nline three\nline four\nline five\n";
const BOB_EDIT: &str = "line one\nline two\nline three\nfour by bob\nfive by bob\n";
const CAROL_EDIT: &str = "line one\ntwo by carol\nthree by carol\nfour by bob\nfive by carol\n";

fn commit_file(repo: &Repository, path: &str, content: &str, name: &str, email: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    std::fs::write(workdir.join(path), content).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now(name, email).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents)
        .unwrap()
}

/// Alice writes the file, Bob rewrites lines 4-5, Carol's change (the
/// patch set under review) touches lines 2-3 and 5. Blamed at Bob's
/// commit that credits Alice with two lines and Bob with one.
fn fixture() -> (TempDir, Repository, Oid, Oid) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, "code.txt", BASE, "Alice", "alice@example.com");
    let bob = commit_file(&repo, "code.txt", BOB_EDIT, "Bob", "bob@example.com");
    let carol = commit_file(&repo, "code.txt", CAROL_EDIT, "Carol", "carol@example.com");
    (dir, repo, bob, carol)
}

fn revision(repo: &Repository, oid: Oid) -> RevisionCommit {
    let commit = repo.find_commit(oid).unwrap();
    RevisionCommit {
        id: commit.id().to_string(),
        parents: commit.parent_ids().map(|p| p.to_string()).collect(),
    }
}

fn write_roster(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("roster.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 1, "name": "Alice", "emails": ["alice@example.com"]},
            {"id": 2, "name": "Bob", "emails": ["bob@example.com"]},
            {"id": 3, "name": "Carol", "emails": ["carol@example.com"]}
        ]"#,
    )
    .unwrap();
    path
}

#[test]
fn diff_engine_reports_exact_edit_ranges() {
    let (_dir, repo, bob, carol) = fixture();
    let files = GitDiffEngine::new(&repo)
        .list_modified_files("demo", &carol.to_string(), &bob.to_string())
        .unwrap();

    assert_eq!(files.len(), 1);
    let entry = &files["code.txt"];
    assert_eq!(entry.kind, ChangeKind::Modified);
    assert_eq!(entry.old_path.as_deref(), Some("code.txt"));
    let old_ranges: Vec<(usize, usize)> = entry
        .edits
        .iter()
        .map(|e| (e.begin_old, e.end_old))
        .collect();
    assert_eq!(old_ranges, vec![(1, 3), (4, 5)]);
}

#[test]
fn suggests_the_authors_who_last_touched_the_changed_lines() {
    let (dir, repo, _bob, carol) = fixture();
    let roster = RosterDirectory::load(&write_roster(&dir)).unwrap();
    let owner = roster.account_for_email("carol@example.com").unwrap();

    let diff_engine = GitDiffEngine::new(&repo);
    let blame_engine = GitBlameEngine::new(&repo);
    let client = StdoutReviewClient::new(&roster);

    let run = |k: usize| {
        ReviewerSuggester::new(
            revision(&repo, carol),
            Change {
                id: carol.to_string(),
                project: "demo".into(),
                owner,
            },
            k,
            None,
            &diff_engine,
            &blame_engine,
            &roster,
            &roster,
            &client,
        )
        .run()
    };

    // Alice owns two of the blamed lines, Bob one
    assert_eq!(run(1), BTreeSet::from([AccountId(1)]));
    assert_eq!(run(2), BTreeSet::from([AccountId(1), AccountId(2)]));
}

#[test]
fn auto_directory_minted_accounts_carry_the_author_emails() {
    let (_dir, repo, _bob, carol) = fixture();
    let auto = AutoDirectory::new();
    let owner = auto.account_for_email("carol@example.com");

    let diff_engine = GitDiffEngine::new(&repo);
    let blame_engine = GitBlameEngine::new(&repo);
    let client = StdoutReviewClient::new(&auto);

    let top = ReviewerSuggester::new(
        revision(&repo, carol),
        Change {
            id: carol.to_string(),
            project: "demo".into(),
            owner,
        },
        5,
        None,
        &diff_engine,
        &blame_engine,
        &auto,
        &auto,
        &client,
    )
    .run();

    let emails: BTreeSet<String> = top
        .iter()
        .map(|id| auto.get_account(*id).unwrap().name)
        .collect();
    assert_eq!(
        emails,
        BTreeSet::from(["alice@example.com".to_string(), "bob@example.com".to_string()])
    );
}

#[test]
fn a_change_that_only_adds_a_file_suggests_nobody() {
    let (dir, repo, _bob, _carol) = fixture();
    let added = commit_file(&repo, "new.txt", "fresh\n", "Dave", "dave@example.com");
    let roster = RosterDirectory::load(&write_roster(&dir)).unwrap();

    let diff_engine = GitDiffEngine::new(&repo);
    let blame_engine = GitBlameEngine::new(&repo);
    let client = StdoutReviewClient::new(&roster);

    let top = ReviewerSuggester::new(
        revision(&repo, added),
        Change {
            id: added.to_string(),
            project: "demo".into(),
            owner: AccountId(4),
        },
        3,
        None,
        &diff_engine,
        &blame_engine,
        &roster,
        &roster,
        &client,
    )
    .run();
    assert!(top.is_empty());
}

#[test]
fn the_root_commit_suggests_nobody() {
    let (dir, repo, _bob, _carol) = fixture();
    let root = {
        let mut walk = repo.revwalk().unwrap();
        walk.push_head().unwrap();
        walk.filter_map(Result::ok).last().unwrap()
    };
    let roster = RosterDirectory::load(&write_roster(&dir)).unwrap();

    let diff_engine = GitDiffEngine::new(&repo);
    let blame_engine = GitBlameEngine::new(&repo);
    let client = StdoutReviewClient::new(&roster);

    let top = ReviewerSuggester::new(
        revision(&repo, root),
        Change {
            id: root.to_string(),
            project: "demo".into(),
            owner: AccountId(1),
        },
        3,
        None,
        &diff_engine,
        &blame_engine,
        &roster,
        &roster,
        &client,
    )
    .run();
    assert!(top.is_empty());
}
