//! Video asset model.
//!
//! An asset is one entry of the video catalogue. The catalogue itself is
//! owned by an external store; the scheduler only reads snapshots of it.
//!
//! # Time Representation
//! Durations are in seconds (`f64`), matching what media probing reports.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::Tariff;

/// Catalogue identifier of an asset.
pub type AssetId = i64;

/// Asset lookup keyed by id.
pub type AssetLookup = HashMap<AssetId, Asset>;

/// Kind of a video asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Contract spot with a guaranteed hourly play count.
    Contract,
    /// Filler spot used to pad unused time.
    Filler,
}

/// A video asset in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Human-readable title.
    pub title: String,
    /// Media path relative to the media root (e.g. `/uploads/videos/a.mp4`).
    pub file_path: String,
    /// Contract or filler.
    pub kind: AssetKind,
    /// Playback duration (s). `None` = not probed yet.
    pub duration: Option<f64>,
    /// Required plays per hour (contract assets). `None` = once.
    pub plays_per_hour: Option<u32>,
    /// Tariffs this asset may be shown under.
    pub tariffs: BTreeSet<Tariff>,
    /// Ordering hint among fillers (higher = earlier).
    pub priority: i32,
    /// Inactive assets never enter a schedule.
    pub is_active: bool,
}

impl Asset {
    /// Creates an active asset with no duration and no tariffs.
    pub fn new(id: AssetId, kind: AssetKind) -> Self {
        Self {
            id,
            title: String::new(),
            file_path: String::new(),
            kind,
            duration: None,
            plays_per_hour: None,
            tariffs: BTreeSet::new(),
            priority: 0,
            is_active: true,
        }
    }

    /// Creates a contract asset.
    pub fn contract(id: AssetId) -> Self {
        Self::new(id, AssetKind::Contract)
    }

    /// Creates a filler asset.
    pub fn filler(id: AssetId) -> Self {
        Self::new(id, AssetKind::Filler)
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the media file path.
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Sets the duration (s).
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Sets the required plays per hour.
    pub fn with_plays_per_hour(mut self, plays: u32) -> Self {
        self.plays_per_hour = Some(plays);
        self
    }

    /// Adds an eligible tariff.
    pub fn with_tariff(mut self, tariff: Tariff) -> Self {
        self.tariffs.insert(tariff);
        self
    }

    /// Replaces the eligible tariffs.
    pub fn with_tariffs(mut self, tariffs: impl IntoIterator<Item = Tariff>) -> Self {
        self.tariffs = tariffs.into_iter().collect();
        self
    }

    /// Sets the filler priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Duration in seconds, `0.0` when unknown.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// Plays per hour, defaulting to 1 when unset.
    #[inline]
    pub fn play_count(&self) -> u32 {
        self.plays_per_hour.unwrap_or(1)
    }

    /// Seconds of airtime this asset claims per hour (`duration × play_count`).
    pub fn hourly_load_secs(&self) -> f64 {
        self.duration_secs() * f64::from(self.play_count())
    }

    /// Whether the asset is a contract spot.
    pub fn is_contract(&self) -> bool {
        self.kind == AssetKind::Contract
    }

    /// Whether the asset can be placed on a timeline: active with positive duration.
    pub fn is_schedulable(&self) -> bool {
        self.is_active && self.duration_secs() > 0.0
    }

    /// Whether the asset may be shown under `tariff`.
    pub fn is_eligible_for(&self, tariff: Tariff) -> bool {
        self.tariffs.contains(&tariff)
    }
}

/// Builds an id → asset lookup from a catalogue snapshot.
///
/// When ids repeat, the last entry wins.
pub fn asset_lookup<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> AssetLookup {
    assets.into_iter().map(|a| (a.id, a.clone())).collect()
}
