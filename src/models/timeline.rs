//! Timeline (read-side view of a playlist).
//!
//! A timeline reports where each contract asset first plays within the
//! hour and how often it repeats, plus flat metadata for the fillers.
//! Fillers are interchangeable padding, so they carry no offsets.

use serde::{Deserialize, Serialize};

use super::AssetId;

/// First occurrence of a contract asset within the hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTimelineItem {
    /// Asset id.
    pub asset_id: AssetId,
    /// Start offset from the top of the hour (s).
    pub start_secs: f64,
    /// End offset of the first occurrence (s), clamped to the horizon.
    pub end_secs: f64,
    /// Duration of a single occurrence (s).
    pub duration_secs: f64,
    /// Occurrences of this asset across the whole sequence.
    pub frequency: usize,
    /// Raw media path.
    pub file_path: String,
    /// Resolved media location.
    pub media_url: String,
}

/// Metadata for a filler asset appearing in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerTimelineItem {
    /// Asset id.
    pub asset_id: AssetId,
    /// Duration (s).
    pub duration_secs: f64,
    /// Raw media path.
    pub file_path: String,
    /// Resolved media location.
    pub media_url: String,
}

/// Timeline of one playback cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Contract items in order of first appearance.
    pub contracts: Vec<ContractTimelineItem>,
    /// Filler items in order of first appearance.
    pub fillers: Vec<FillerTimelineItem>,
    /// Length of the cycle (s).
    pub total_duration_secs: f64,
}

impl ContractTimelineItem {
    /// Span of the first occurrence (end - start) in seconds.
    #[inline]
    pub fn span_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

impl Timeline {
    /// Finds the contract item for an asset.
    pub fn contract(&self, asset_id: AssetId) -> Option<&ContractTimelineItem> {
        self.contracts.iter().find(|c| c.asset_id == asset_id)
    }

    /// Finds the filler item for an asset.
    pub fn filler(&self, asset_id: AssetId) -> Option<&FillerTimelineItem> {
        self.fillers.iter().find(|f| f.asset_id == asset_id)
    }

    /// Whether neither contracts nor fillers were recorded.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty() && self.fillers.is_empty()
    }

    /// Contract plays per hour summed over all contract items.
    pub fn contract_plays(&self) -> usize {
        self.contracts.iter().map(|c| c.frequency).sum()
    }
}
