// src/aggregate.rs

use tracing::{debug, warn};

use crate::engines::{AccountDirectory, IdentityResolver};
use crate::model::{AccountId, BlameAttribution, EditRange, WeightMap};

/// Walks every old-file line of the given edit ranges and credits one
/// weight unit per attributed line to each account the author's email
/// resolves to, skipping absent, inactive and owner accounts.
///
/// Returns the delta for one file; the caller merges deltas across files
/// with [`merge_weights`]. A failed identity lookup skips that single
/// line, the rest of the file keeps accumulating.
pub fn accumulate(
    edits: &[EditRange],
    attribution: &BlameAttribution,
    owner: AccountId,
    identities: &dyn IdentityResolver,
    accounts: &dyn AccountDirectory,
) -> WeightMap {
    let mut delta = WeightMap::new();
    for edit in edits {
        for line in edit.begin_old..edit.end_old {
            let Some(origin) = attribution.line(line) else {
                debug!(line, "line has no attribution, skipping");
                continue;
            };
            let ids = match identities.accounts_for_email(&origin.author_email) {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(line, error = %err, "identity lookup failed, skipping line");
                    continue;
                }
            };
            // One email can fan out to several accounts; each one is
            // credited independently for this line.
            for id in ids {
                let Some(account) = accounts.get_account(id) else {
                    continue;
                };
                if account.active && account.id != owner {
                    *delta.entry(account.id).or_insert(0) += 1;
                }
            }
        }
    }
    delta
}

/// Merges one file's delta into the running total by summation.
pub fn merge_weights(total: &mut WeightMap, delta: WeightMap) {
    for (id, weight) in delta {
        *total.entry(id).or_insert(0) += weight;
    }
}
