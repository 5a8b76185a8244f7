//! `LOCATION[/BIN]` address parsing and resolution.
//!
//! # Responsibility
//! - Parse the compact address grammar into a location name and optional bin.
//! - Resolve the name against the store and validate an explicit bin against
//!   the location's declared range.
//!
//! # Invariants
//! - Bin numbers are decimal, at least 1, with no leading zero.
//! - Resolution is read-only; no store mutation happens here.

use crate::error::{InventoryError, InventoryResult};
use crate::model::location::Location;
use crate::store::Store;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/]+)(?:/([1-9][0-9]*))?$").expect("valid address regex"));

/// Token does not match the `LOCATION[/BIN]` grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParseError {
    token: String,
}

impl Display for AddressParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid address `{}`: expected LOCATION or LOCATION/BIN with a bin number of at least 1",
            self.token
        )
    }
}

impl Error for AddressParseError {}

impl From<AddressParseError> for InventoryError {
    fn from(value: AddressParseError) -> Self {
        Self::AddressSyntax { token: value.token }
    }
}

/// Parsed but not yet resolved `LOCATION[/BIN]` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAddress {
    pub location: String,
    pub bin: Option<i64>,
}

impl std::str::FromStr for ItemAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax_error = || AddressParseError {
            token: s.to_string(),
        };

        let captures = ADDRESS_RE.captures(s).ok_or_else(syntax_error)?;

        let bin = match captures.get(2) {
            // A bin of more digits than i64 holds is grammatical nonsense too.
            Some(digits) => Some(digits.as_str().parse::<i64>().map_err(|_| syntax_error())?),
            None => None,
        };

        Ok(Self {
            location: captures[1].to_string(),
            bin,
        })
    }
}

impl Display for ItemAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.bin {
            Some(bin) => write!(f, "{}/{bin}", self.location),
            None => f.write_str(&self.location),
        }
    }
}

/// Resolves an address against the store.
///
/// # Contract
/// - Exactly one location must match the name (case-insensitive phrase
///   match); zero matches and multiple matches are distinct errors.
/// - An explicit bin must satisfy `1 <= bin <= num_bins`.
pub fn resolve_location<S: Store>(
    store: &S,
    address: &ItemAddress,
) -> InventoryResult<(Location, Option<i64>)> {
    let records = store.query(&Location::query_named(&address.location))?;
    let mut candidates = records
        .iter()
        .map(Location::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let location = match candidates.len() {
        0 => {
            return Err(InventoryError::LocationNotFound {
                name: address.location.clone(),
            })
        }
        1 => candidates.remove(0),
        _ => {
            return Err(InventoryError::AmbiguousLocation {
                name: address.location.clone(),
                candidates: candidates.into_iter().map(|l| l.name).collect(),
            })
        }
    };

    if let Some(bin) = address.bin {
        if bin < 1 || bin > location.num_bins {
            return Err(InventoryError::BinRange {
                location: location.name.clone(),
                bin,
                num_bins: location.num_bins,
            });
        }
    }

    Ok((location, address.bin))
}
