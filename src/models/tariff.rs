//! Service tariffs.
//!
//! A tariff is the service tier of a vehicle. It gates which assets are
//! eligible for the playlists generated for that vehicle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Service tier of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tariff {
    /// Entry tier.
    Standard,
    /// Comfort tier.
    Comfort,
    /// Business tier.
    Business,
    /// Premium tier.
    Premium,
}

/// Error returned when a tariff name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tariff: {0}")]
pub struct UnknownTariff(pub String);

impl Tariff {
    /// All tariffs, in tier order.
    pub const ALL: [Tariff; 4] = [
        Tariff::Standard,
        Tariff::Comfort,
        Tariff::Business,
        Tariff::Premium,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tariff::Standard => "standard",
            Tariff::Comfort => "comfort",
            Tariff::Business => "business",
            Tariff::Premium => "premium",
        }
    }

    /// Parses a comma-separated eligibility column (e.g. `"standard,comfort"`).
    ///
    /// Whitespace around names is ignored, as are unknown names.
    pub fn parse_list(list: &str) -> BTreeSet<Tariff> {
        list.split(',')
            .filter_map(|name| name.trim().parse().ok())
            .collect()
    }
}

impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tariff {
    type Err = UnknownTariff;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tariff::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTariff(s.to_string()))
    }
}
