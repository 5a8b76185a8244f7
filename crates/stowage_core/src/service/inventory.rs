//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide one entry point per command: add-location, locations, add,
//!   quickadd, items, undo.
//! - Enforce argument validation before any store mutation.
//!
//! # Invariants
//! - Every mutating entry point performs exactly one batch of `add` calls
//!   followed by exactly one `commit`, except quickadd which commits once
//!   per accepted line.
//! - Validation failures never leave partial state behind.

use crate::address::{resolve_location, ItemAddress};
use crate::balance::choose_bin;
use crate::error::{InventoryError, InventoryResult};
use crate::intake::run_intake;
use crate::listing::{list_items, row_for_item, ListingRow};
use crate::model::item::{Item, ItemSize};
use crate::model::location::Location;
use crate::store::{Store, StoreError};
use log::info;
use std::io::{BufRead, Write};

/// Command-level service over any store implementation.
pub struct InventoryService<S: Store> {
    store: S,
}

impl<S: Store> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a location with a fixed number of bins.
    ///
    /// # Contract
    /// - `num_bins` must be at least 1.
    /// - One `add`, one `commit`.
    pub fn add_location(&mut self, name: &str, num_bins: i64) -> InventoryResult<Location> {
        if num_bins < 1 {
            return Err(InventoryError::Validation(format!(
                "number of bins must be at least 1, got {num_bins}"
            )));
        }

        let mut location = Location::new(name, num_bins);
        location.object_id = Some(self.store.add(location.to_record())?);
        self.store.commit(&format!("add location {name}"))?;

        info!(
            "event=location_added module=service status=ok name={name} num_bins={num_bins}"
        );

        Ok(location)
    }

    /// Lists all locations in store order.
    pub fn locations(&self) -> InventoryResult<Vec<Location>> {
        let records = self.store.query(&Location::query_all())?;
        let locations = records
            .iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(locations)
    }

    /// Adds one item at the addressed location.
    ///
    /// When the address has no explicit bin, the least-loaded bin is chosen.
    /// Returns the confirmation row for the created item.
    pub fn add_item(
        &mut self,
        address: &ItemAddress,
        name: &str,
        size: ItemSize,
    ) -> InventoryResult<ListingRow> {
        let (location, bin) = resolve_location(&self.store, address)?;
        let location_id = persisted_id(&location)?;

        let bin_no = match bin {
            Some(bin_no) => bin_no,
            None => choose_bin(&self.store, location_id, location.num_bins)?,
        };

        let mut item = Item::new(location_id, bin_no, name, size);
        item.object_id = Some(self.store.add(item.to_record())?);
        self.store.commit(&format!("add item {name}"))?;

        info!(
            "event=item_added module=service status=ok location={} bin={bin_no} size={size}",
            location.name
        );

        Ok(row_for_item(&item, &location))
    }

    /// Runs the interactive intake loop at the addressed location.
    ///
    /// Returns the number of items created.
    pub fn quickadd<R: BufRead, W: Write>(
        &mut self,
        address: &ItemAddress,
        input: R,
        output: &mut W,
    ) -> InventoryResult<usize> {
        let (location, bin) = resolve_location(&self.store, address)?;
        run_intake(&mut self.store, &location, bin, input, output)
    }

    /// Produces the full sorted item listing.
    pub fn items(&self) -> InventoryResult<Vec<ListingRow>> {
        list_items(&self.store)
    }

    /// Reverts the most recent committed change.
    ///
    /// Returns the description of the undone transaction, or `None` when
    /// there was nothing to undo.
    pub fn undo(&mut self) -> InventoryResult<Option<String>> {
        let undone = self.store.undo()?;
        match &undone {
            Some(description) => {
                info!("event=undo module=service status=ok description={description}")
            }
            None => info!("event=undo module=service status=noop"),
        }
        Ok(undone)
    }
}

fn persisted_id(location: &Location) -> Result<i64, InventoryError> {
    location.object_id.ok_or_else(|| {
        StoreError::InvalidData(format!("location \"{}\" is not persisted", location.name)).into()
    })
}
