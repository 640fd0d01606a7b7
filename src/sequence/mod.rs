//! Play sequence construction.
//!
//! Turns a tariff's eligible assets into one hour of playback: contract
//! spots at their required frequency, fillers padding the rest of the
//! budget, contract entries spread evenly across the hour.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use signage_schedule::models::{Asset, Tariff};
//! use signage_schedule::sequence::SequenceBuilder;
//!
//! let catalogue = vec![
//!     Asset::contract(1).with_duration(15.0).with_plays_per_hour(3).with_tariff(Tariff::Standard),
//!     Asset::filler(2).with_duration(30.0).with_tariff(Tariff::Standard),
//!     Asset::filler(3).with_duration(25.0).with_tariff(Tariff::Standard),
//! ];
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let sequence = SequenceBuilder::new().generate(Tariff::Standard, &catalogue, &mut rng);
//! assert_eq!(sequence.iter().filter(|&&id| id == 1).count(), 3);
//! ```

mod distribute;
mod fill;

pub use distribute::distribute_evenly;
pub use fill::{ContractBackedFill, FillLimits, FillPolicy, FillStrategy, PureFillerShuffle};

use rand::Rng;

use crate::config::EngineConfig;
use crate::models::{Asset, AssetId, Tariff};
use crate::selection::{select_assets, AssetSelection};

/// Builds play sequences under a time budget.
#[derive(Debug, Clone)]
pub struct SequenceBuilder {
    limits: FillLimits,
}

impl SequenceBuilder {
    /// Creates a builder with a one-hour budget and the default entry cap.
    pub fn new() -> Self {
        Self {
            limits: FillLimits::default(),
        }
    }

    /// Creates a builder from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new()
            .with_budget(config.budget_secs)
            .with_max_entries(config.max_entries)
    }

    /// Sets the time budget (s).
    pub fn with_budget(mut self, budget_secs: f64) -> Self {
        self.limits.budget_secs = budget_secs;
        self
    }

    /// Sets the cap on sequence entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.limits.max_entries = max_entries;
        self
    }

    /// Current limits.
    pub fn limits(&self) -> &FillLimits {
        &self.limits
    }

    /// Builds a sequence from an existing selection.
    ///
    /// An empty result means nothing is eligible; it is not an error.
    pub fn build<R: Rng>(&self, selection: &AssetSelection, rng: &mut R) -> Vec<AssetId> {
        let policy = FillPolicy::for_selection(selection);
        let sequence = policy.fill(selection, &self.limits, rng);

        tracing::debug!(
            policy = policy.name(),
            entries = sequence.len(),
            budget_secs = self.limits.budget_secs,
            "Built play sequence"
        );

        sequence
    }

    /// Selects the assets for `tariff` and builds a sequence.
    pub fn generate<R: Rng>(
        &self,
        tariff: Tariff,
        catalogue: &[Asset],
        rng: &mut R,
    ) -> Vec<AssetId> {
        let selection = select_assets(tariff, catalogue);
        if selection.is_empty() {
            tracing::info!(tariff = %tariff, "No eligible assets, playlist will be empty");
        }
        self.build(&selection, rng)
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the play sequence for `tariff` under `budget_secs`.
///
/// Convenience wrapper over [`SequenceBuilder`] with the default entry cap.
pub fn generate_sequence<R: Rng>(
    tariff: Tariff,
    catalogue: &[Asset],
    budget_secs: f64,
    rng: &mut R,
) -> Vec<AssetId> {
    SequenceBuilder::new()
        .with_budget(budget_secs)
        .generate(tariff, catalogue, rng)
}
