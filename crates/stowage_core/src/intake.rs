//! Interactive line-oriented item intake.
//!
//! # Responsibility
//! - Read item names from an input stream, one item per line, until a blank
//!   line or end of input.
//! - Recognize an optional trailing size token and persist each item with
//!   one commit per line.
//!
//! # Invariants
//! - A blank line or end of input terminates the loop successfully.
//! - Each line is committed before the next is read, so balancing reacts to
//!   items added earlier in the same session.
//! - When no explicit bin was given, the target bin is recomputed per line.

use crate::balance::choose_bin;
use crate::error::{InventoryError, InventoryResult};
use crate::listing::row_for_item;
use crate::model::item::{Item, ItemSize};
use crate::model::location::Location;
use crate::store::{Store, StoreError};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{BufRead, Write};

static SIZE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s+([SMLX])$").expect("valid size suffix regex"));

/// Splits one intake line into item name and size.
///
/// The size token is recognized only as the last whitespace-delimited token;
/// everything else, trimmed, is the name. Without a token the size defaults
/// to `S`. Returns `None` for blank lines.
fn parse_intake_line(line: &str) -> Option<(String, ItemSize)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(captures) = SIZE_SUFFIX_RE.captures(trimmed) {
        let size = captures[2]
            .parse::<ItemSize>()
            .unwrap_or(ItemSize::S);
        return Some((captures[1].to_string(), size));
    }

    Some((trimmed.to_string(), ItemSize::S))
}

/// Runs the intake loop against a resolved location.
///
/// Writes one confirmation row per accepted item to `output` and returns the
/// number of items created.
pub fn run_intake<S, R, W>(
    store: &mut S,
    location: &Location,
    bin: Option<i64>,
    input: R,
    output: &mut W,
) -> InventoryResult<usize>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let location_id = location.object_id.ok_or_else(|| {
        StoreError::InvalidData(format!("location \"{}\" is not persisted", location.name))
    })?;

    let mut accepted = 0;
    for line in input.lines() {
        let line = line?;
        let Some((name, size)) = parse_intake_line(&line) else {
            break;
        };

        let bin_no = match bin {
            Some(bin_no) => bin_no,
            None => choose_bin(store, location_id, location.num_bins)?,
        };

        let mut item = Item::new(location_id, bin_no, name, size);
        item.object_id = Some(store.add(item.to_record())?);
        store.commit(&format!("add item {}", item.name))?;

        writeln!(output, "{}", row_for_item(&item, location)).map_err(InventoryError::Io)?;
        accepted += 1;
    }

    info!(
        "event=intake_done module=intake status=ok location={} items={accepted}",
        location.name
    );

    Ok(accepted)
}
