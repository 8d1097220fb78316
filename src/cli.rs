// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the git repository containing the change
    #[arg(short, long)]
    pub repo: PathBuf,

    /// Revision of the patch set under review
    #[arg(short, long, default_value = "HEAD")]
    pub change: String,

    /// Maximum number of reviewers to suggest
    #[arg(long, default_value_t = 3)]
    pub max_reviewers: usize,

    /// Regex of new-file paths to exclude from blame (must match the whole path)
    #[arg(long, default_value = "")]
    pub ignore_file_regex: String,

    /// JSON roster of accounts ({id, name, emails, active} records);
    /// without it one account is minted per distinct author email
    #[arg(long)]
    pub accounts: Option<PathBuf>,
}
