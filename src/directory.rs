// src/directory.rs
//
// Local stand-ins for the account-side collaborators: a roster file for
// teams that maintain one, an automatic directory for plain repositories,
// and a stdout review client for the CLI.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::engines::{AccountDirectory, IdentityError, IdentityResolver, ReviewClient, ReviewError};
use crate::model::{Account, AccountId};

#[derive(Debug, Deserialize)]
struct RosterEntry {
    id: u32,
    name: String,
    emails: Vec<String>,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

/// Identity resolver and account directory backed by a JSON roster file:
/// an array of `{id, name, emails, active}` records.
pub struct RosterDirectory {
    accounts: BTreeMap<AccountId, Account>,
    by_email: HashMap<String, BTreeSet<AccountId>>,
}

impl RosterDirectory {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("could not open roster {}", path.display()))?;
        let entries: Vec<RosterEntry> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("could not parse roster {}", path.display()))?;
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: Vec<RosterEntry>) -> Self {
        let mut accounts = BTreeMap::new();
        let mut by_email: HashMap<String, BTreeSet<AccountId>> = HashMap::new();
        for entry in entries {
            let id = AccountId(entry.id);
            accounts.insert(
                id,
                Account {
                    id,
                    name: entry.name,
                    active: entry.active,
                },
            );
            for email in entry.emails {
                by_email.entry(email).or_default().insert(id);
            }
        }
        Self { accounts, by_email }
    }

    /// Lowest account id registered for an email, used to pin down the
    /// change owner. None if the email is not in the roster.
    pub fn account_for_email(&self, email: &str) -> Option<AccountId> {
        self.by_email.get(email).and_then(|ids| ids.first().copied())
    }
}

impl IdentityResolver for RosterDirectory {
    fn accounts_for_email(&self, email: &str) -> Result<BTreeSet<AccountId>, IdentityError> {
        Ok(self.by_email.get(email).cloned().unwrap_or_default())
    }
}

impl AccountDirectory for RosterDirectory {
    fn get_account(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).cloned()
    }
}

#[derive(Default)]
struct AutoState {
    by_email: HashMap<String, AccountId>,
    names: BTreeMap<AccountId, String>,
    next: u32,
}

/// Mints one active account per distinct author email on first sight.
/// Used when no roster is given; deterministic for a fixed input since
/// accounts are handed out in lookup order.
#[derive(Default)]
pub struct AutoDirectory {
    state: RefCell<AutoState>,
}

impl AutoDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_for_email(&self, email: &str) -> AccountId {
        let mut state = self.state.borrow_mut();
        if let Some(&id) = state.by_email.get(email) {
            return id;
        }
        state.next += 1;
        let id = AccountId(state.next);
        state.by_email.insert(email.to_string(), id);
        state.names.insert(id, email.to_string());
        id
    }
}

impl IdentityResolver for AutoDirectory {
    fn accounts_for_email(&self, email: &str) -> Result<BTreeSet<AccountId>, IdentityError> {
        Ok(BTreeSet::from([self.account_for_email(email)]))
    }
}

impl AccountDirectory for AutoDirectory {
    fn get_account(&self, id: AccountId) -> Option<Account> {
        let state = self.state.borrow();
        state.names.get(&id).map(|email| Account {
            id,
            name: email.clone(),
            active: true,
        })
    }
}

/// Review client for the CLI: reports the selection on stdout instead of
/// talking to a review server.
pub struct StdoutReviewClient<'a> {
    accounts: &'a dyn AccountDirectory,
}

impl<'a> StdoutReviewClient<'a> {
    pub fn new(accounts: &'a dyn AccountDirectory) -> Self {
        Self { accounts }
    }
}

impl ReviewClient for StdoutReviewClient<'_> {
    fn add_reviewers(
        &self,
        change_id: &str,
        reviewers: &BTreeSet<AccountId>,
    ) -> Result<(), ReviewError> {
        if reviewers.is_empty() {
            println!("No reviewers suggested for change {}.", change_id);
            return Ok(());
        }
        println!("Suggested reviewers for change {}:", change_id);
        for id in reviewers {
            match self.accounts.get_account(*id) {
                Some(account) => println!("  {} ({})", account.name, id),
                None => println!("  account {}", id),
            }
        }
        Ok(())
    }
}
