//! Deterministic inventory listing.
//!
//! # Responsibility
//! - Join item records with their locations into display rows.
//! - Sort rows into the one stable order every listing uses.
//!
//! # Invariants
//! - Ordering is `(location name, bin number, item name case-insensitive)`,
//!   with the item's object id as the final stable tie-break.
//! - Listing is read-only; repeated calls over unchanged data are identical.

use crate::error::InventoryResult;
use crate::model::item::{Item, ItemSize};
use crate::model::location::Location;
use crate::store::{ObjectId, Store, StoreError};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// One formatted line of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub location_name: String,
    pub bin_no: i64,
    pub item_name: String,
    pub size: ItemSize,
}

impl Display for ListingRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}: {} ({})",
            self.location_name, self.bin_no, self.item_name, self.size
        )
    }
}

/// Builds the confirmation row for one freshly added item.
pub fn row_for_item(item: &Item, location: &Location) -> ListingRow {
    ListingRow {
        location_name: location.name.clone(),
        bin_no: item.bin_no,
        item_name: item.name.clone(),
        size: item.size,
    }
}

/// Produces the full sorted listing of all items.
pub fn list_items<S: Store>(store: &S) -> InventoryResult<Vec<ListingRow>> {
    let mut locations: BTreeMap<ObjectId, Location> = BTreeMap::new();
    for record in store.query(&Location::query_all())? {
        let location = Location::try_from(&record)?;
        if let Some(id) = location.object_id {
            locations.insert(id, location);
        }
    }

    let mut rows = Vec::new();
    for record in store.query(&Item::query_all())? {
        let item = Item::try_from(&record)?;
        let location = locations.get(&item.location_id).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "item \"{}\" references unknown location {}",
                item.name, item.location_id
            ))
        })?;

        rows.push((row_for_item(&item, location), item.object_id));
    }

    rows.sort_by(|(a, a_id), (b, b_id)| {
        a.location_name
            .cmp(&b.location_name)
            .then(a.bin_no.cmp(&b.bin_no))
            .then(a.item_name.to_lowercase().cmp(&b.item_name.to_lowercase()))
            .then(a_id.cmp(b_id))
    });

    Ok(rows.into_iter().map(|(row, _)| row).collect())
}
