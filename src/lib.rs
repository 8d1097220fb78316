// src/lib.rs
//
// Suggests code reviewers for a change by blaming the changed lines at
// the change's parent revision and ranking the authors who last touched
// them.

pub mod aggregate;
pub mod blame;
pub mod directory;
pub mod eligibility;
pub mod engines;
pub mod git;
pub mod model;
pub mod select;
pub mod suggester;

pub use model::{Account, AccountId, Change, RevisionCommit, WeightMap};
pub use suggester::ReviewerSuggester;
