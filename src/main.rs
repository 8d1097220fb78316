// src/main.rs

mod cli;

use anyhow::Context;
use chrono::TimeZone;
use clap::Parser;
use cli::Args;
use git2::Repository;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use git_reviewers::directory::{AutoDirectory, RosterDirectory, StdoutReviewClient};
use git_reviewers::eligibility::compile_ignore;
use git_reviewers::engines::{AccountDirectory, IdentityResolver};
use git_reviewers::git::{GitBlameEngine, GitDiffEngine};
use git_reviewers::model::{AccountId, Change, RevisionCommit};
use git_reviewers::suggester::ReviewerSuggester;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let start_time = Instant::now();

    let repo = Repository::open(&args.repo)
        .with_context(|| format!("could not open repository at {}", args.repo.display()))?;
    let commit = repo
        .revparse_single(&args.change)
        .and_then(|obj| obj.peel_to_commit())
        .with_context(|| format!("could not resolve revision '{}'", args.change))?;

    let author = commit.author();
    let author_email = author.email().unwrap_or("").to_string();
    let author_name = author.name().unwrap_or("unknown").to_string();
    let commit_id = commit.id().to_string();
    println!(
        "Change {} by {} <{}>, authored {}.",
        &commit_id[..10],
        author_name,
        author_email,
        chrono::Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .map(|t| t.to_rfc2822())
            .unwrap_or_else(|| "unknown time".to_string())
    );

    let revision = RevisionCommit {
        id: commit.id().to_string(),
        parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
    };

    let roster = match &args.accounts {
        Some(path) => Some(RosterDirectory::load(path)?),
        None => None,
    };
    let auto = AutoDirectory::new();
    let (identities, accounts): (&dyn IdentityResolver, &dyn AccountDirectory) = match &roster {
        Some(r) => (r, r),
        None => (&auto, &auto),
    };

    let owner = match &roster {
        Some(r) => r.account_for_email(&author_email).unwrap_or_else(|| {
            tracing::warn!(
                email = author_email,
                "change author is not in the roster, owner exclusion will match nobody"
            );
            AccountId(u32::MAX)
        }),
        None => auto.account_for_email(&author_email),
    };

    let project = args
        .repo
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.repo.display().to_string());
    let change = Change {
        id: commit.id().to_string(),
        project,
        owner,
    };

    let ignore = compile_ignore(&args.ignore_file_regex).context("invalid --ignore-file-regex")?;

    let diff_engine = GitDiffEngine::new(&repo);
    let blame_engine = GitBlameEngine::new(&repo);
    let client = StdoutReviewClient::new(accounts);

    let suggester = ReviewerSuggester::new(
        revision,
        change,
        args.max_reviewers,
        ignore,
        &diff_engine,
        &blame_engine,
        identities,
        accounts,
        &client,
    );
    suggester.run();

    println!("Done in {:.2?}.", start_time.elapsed());
    Ok(())
}
