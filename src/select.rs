// src/select.rs

use std::collections::BTreeSet;

use crate::model::{AccountId, WeightMap};

/// Picks the k highest-weighted accounts from the map. Equal weights are
/// broken by ascending account id so that selection is reproducible for
/// identical inputs.
pub fn select_top(weights: &WeightMap, k: usize) -> BTreeSet<AccountId> {
    let mut ranked: Vec<(&AccountId, &u32)> = weights.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    ranked.into_iter().take(k).map(|(id, _)| *id).collect()
}
