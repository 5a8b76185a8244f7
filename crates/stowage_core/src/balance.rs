//! Weighted bin balancing.
//!
//! # Responsibility
//! - Pick the least-loaded bin of a location for a new item.
//!
//! # Invariants
//! - Load is recomputed from the store on every call; there is no persisted
//!   aggregate to drift out of sync.
//! - Ties are broken deterministically by lowest bin number.

use crate::error::InventoryResult;
use crate::model::item::Item;
use crate::store::{ObjectId, Store};

/// Returns the lowest-numbered bin with minimal accumulated weight.
///
/// The returned bin is not reserved; callers are expected to commit the new
/// item before balancing again.
pub fn choose_bin<S: Store>(
    store: &S,
    location_id: ObjectId,
    num_bins: i64,
) -> InventoryResult<i64> {
    let mut load = vec![0i64; num_bins as usize];

    for record in store.query(&Item::query_at(location_id))? {
        let item = Item::try_from(&record)?;
        if (1..=num_bins).contains(&item.bin_no) {
            load[(item.bin_no - 1) as usize] += item.size.weight();
        }
    }

    let min_load = load.iter().copied().min().unwrap_or(0);
    let bin_index = load
        .iter()
        .position(|&weight| weight == min_load)
        .unwrap_or(0);

    Ok(bin_index as i64 + 1)
}
