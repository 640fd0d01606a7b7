//! Asset selection for a tariff.
//!
//! Partitions a catalogue snapshot into the contract and filler sets that
//! feed sequence construction. Inactive assets and assets without a
//! positive duration are excluded silently.

use crate::models::{Asset, AssetKind, Tariff};

/// Assets eligible for one tariff, split by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSelection {
    /// Contract assets in catalogue order.
    pub contracts: Vec<Asset>,
    /// Filler assets by descending priority (ties keep catalogue order).
    pub fillers: Vec<Asset>,
}

impl AssetSelection {
    /// Creates a selection from already-partitioned lists, taken as-is.
    pub fn new(contracts: Vec<Asset>, fillers: Vec<Asset>) -> Self {
        Self { contracts, fillers }
    }

    /// Whether any contract assets were selected.
    pub fn has_contracts(&self) -> bool {
        !self.contracts.is_empty()
    }

    /// Whether nothing at all was selected.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty() && self.fillers.is_empty()
    }
}

/// Selects the assets eligible for `tariff`.
///
/// # Example
///
/// ```
/// use signage_schedule::models::{Asset, Tariff};
/// use signage_schedule::selection::select_assets;
///
/// let catalogue = vec![
///     Asset::filler(1).with_duration(30.0).with_priority(1).with_tariff(Tariff::Standard),
///     Asset::filler(2).with_duration(25.0).with_priority(5).with_tariff(Tariff::Standard),
///     Asset::contract(3).with_duration(15.0).with_tariff(Tariff::Premium),
/// ];
/// let selection = select_assets(Tariff::Standard, &catalogue);
/// assert!(selection.contracts.is_empty());
/// assert_eq!(selection.fillers[0].id, 2);
/// ```
pub fn select_assets(tariff: Tariff, catalogue: &[Asset]) -> AssetSelection {
    let mut selection = AssetSelection::default();

    for asset in catalogue
        .iter()
        .filter(|a| a.is_schedulable() && a.is_eligible_for(tariff))
    {
        match asset.kind {
            AssetKind::Contract => selection.contracts.push(asset.clone()),
            AssetKind::Filler => selection.fillers.push(asset.clone()),
        }
    }

    // Stable sort keeps catalogue order among equal priorities
    selection
        .fillers
        .sort_by(|a, b| b.priority.cmp(&a.priority));

    tracing::debug!(
        tariff = %tariff,
        contracts = selection.contracts.len(),
        fillers = selection.fillers.len(),
        "Selected assets"
    );

    selection
}
