//! Play sequence metrics (KPIs).
//!
//! Computes airtime indicators for a generated sequence against its
//! time budget.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total airtime | Sum of durations of schedulable entries |
//! | Contract airtime | Airtime of contract entries |
//! | Filler airtime | Airtime of filler entries |
//! | Overshoot | max(0, total - budget) |
//! | Contract share | Contract airtime / total airtime |
//! | Plays by asset | Occurrences per asset id |

use std::collections::HashMap;

use crate::models::{AssetId, AssetKind, AssetLookup};

/// Sequence performance indicators.
///
/// All time values are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceKpi {
    /// Number of entries, including unresolvable ones.
    pub entry_count: usize,
    /// Airtime of all schedulable entries (s).
    pub total_secs: f64,
    /// Airtime of contract entries (s).
    pub contract_secs: f64,
    /// Airtime of filler entries (s).
    pub filler_secs: f64,
    /// Airtime beyond the budget (s).
    pub overshoot_secs: f64,
    /// Fraction of airtime spent on contracts (0.0..1.0).
    pub contract_share: f64,
    /// Occurrences per asset id.
    pub plays_by_asset: HashMap<AssetId, usize>,
}

impl SequenceKpi {
    /// Computes KPIs from a sequence and the assets it references.
    ///
    /// Entries whose asset is missing, inactive or without duration count
    /// towards `entry_count` and `plays_by_asset` but add no airtime.
    pub fn calculate(sequence: &[AssetId], assets: &AssetLookup, budget_secs: f64) -> Self {
        let mut contract_secs = 0.0;
        let mut filler_secs = 0.0;
        let mut plays_by_asset: HashMap<AssetId, usize> = HashMap::new();

        for &id in sequence {
            *plays_by_asset.entry(id).or_insert(0) += 1;

            let Some(asset) = assets.get(&id).filter(|a| a.is_schedulable()) else {
                continue;
            };
            match asset.kind {
                AssetKind::Contract => contract_secs += asset.duration_secs(),
                AssetKind::Filler => filler_secs += asset.duration_secs(),
            }
        }

        let total_secs = contract_secs + filler_secs;
        let contract_share = if total_secs > 0.0 {
            contract_secs / total_secs
        } else {
            0.0
        };

        Self {
            entry_count: sequence.len(),
            total_secs,
            contract_secs,
            filler_secs,
            overshoot_secs: (total_secs - budget_secs).max(0.0),
            contract_share,
            plays_by_asset,
        }
    }

    /// Plays of one asset.
    pub fn plays(&self, asset_id: AssetId) -> usize {
        self.plays_by_asset.get(&asset_id).copied().unwrap_or(0)
    }

    /// Whether overshoot stays within `tolerance_secs`.
    pub fn within_budget(&self, tolerance_secs: f64) -> bool {
        self.overshoot_secs <= tolerance_secs
    }
}
