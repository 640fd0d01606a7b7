//! Timeline reconstruction from a stored sequence.
//!
//! # Algorithm
//!
//! 1. Tally how often each id occurs in the whole sequence.
//! 2. Walk the sequence with a clock starting at 0. Entries whose asset is
//!    missing, inactive or without positive duration are skipped.
//! 3. The first occurrence of a contract asset records its start, its end
//!    (clamped to the horizon), its duration and its tally. The first
//!    occurrence of a filler records its metadata only.
//! 4. Every valid entry advances the clock by its duration, clamped to the
//!    horizon. The walk stops once the clock reaches the horizon.
//!
//! # Complexity
//! O(n) in the sequence length.

use std::collections::{HashMap, HashSet};

use crate::models::{
    AssetId, AssetKind, AssetLookup, ContractTimelineItem, FillerTimelineItem, Playlist, Timeline,
};

/// Resolves relative media paths into playable locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaResolver {
    base_url: Option<String>,
}

impl MediaResolver {
    /// Creates a resolver; `None` leaves paths untouched.
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    /// Resolver prefixing every path with `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(Some(base_url.into()))
    }

    /// Configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// `base_url + file_path`, or `file_path` when no base URL is set.
    pub fn resolve(&self, file_path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{file_path}"),
            None => file_path.to_string(),
        }
    }
}

/// Builds timelines over a fixed horizon.
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    horizon_secs: f64,
    resolver: MediaResolver,
}

impl TimelineBuilder {
    /// Creates a builder over a one-hour horizon with no base URL.
    pub fn new() -> Self {
        Self {
            horizon_secs: crate::HOUR_SECS,
            resolver: MediaResolver::default(),
        }
    }

    /// Sets the horizon (s).
    pub fn with_horizon(mut self, horizon_secs: f64) -> Self {
        self.horizon_secs = horizon_secs;
        self
    }

    /// Sets the media resolver.
    pub fn with_resolver(mut self, resolver: MediaResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Builds the timeline of a raw sequence.
    pub fn build(&self, sequence: &[AssetId], assets: &AssetLookup) -> Timeline {
        let mut frequency: HashMap<AssetId, usize> = HashMap::new();
        for &id in sequence {
            *frequency.entry(id).or_insert(0) += 1;
        }

        let mut timeline = Timeline {
            total_duration_secs: self.horizon_secs,
            ..Timeline::default()
        };
        let mut emitted: HashSet<AssetId> = HashSet::new();
        let mut collected: HashSet<AssetId> = HashSet::new();
        let mut current = 0.0_f64;

        for &id in sequence {
            if current >= self.horizon_secs {
                break;
            }

            let Some(asset) = assets.get(&id) else {
                continue;
            };
            if !asset.is_schedulable() {
                continue;
            }
            let duration = asset.duration_secs();

            match asset.kind {
                AssetKind::Contract => {
                    if emitted.insert(id) {
                        timeline.contracts.push(ContractTimelineItem {
                            asset_id: id,
                            start_secs: current,
                            end_secs: (current + duration).min(self.horizon_secs),
                            duration_secs: duration,
                            frequency: frequency.get(&id).copied().unwrap_or(0),
                            file_path: asset.file_path.clone(),
                            media_url: self.resolver.resolve(&asset.file_path),
                        });
                    }
                }
                AssetKind::Filler => {
                    if collected.insert(id) {
                        timeline.fillers.push(FillerTimelineItem {
                            asset_id: id,
                            duration_secs: duration,
                            file_path: asset.file_path.clone(),
                            media_url: self.resolver.resolve(&asset.file_path),
                        });
                    }
                }
            }

            current = (current + duration).min(self.horizon_secs);
        }

        timeline
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the one-hour timeline of a stored playlist.
///
/// # Example
///
/// ```
/// use signage_schedule::models::{asset_lookup, Asset};
/// use signage_schedule::timeline::TimelineBuilder;
///
/// let assets = vec![
///     Asset::contract(1).with_duration(15.0).with_file_path("/v/a.mp4"),
///     Asset::filler(2).with_duration(30.0).with_file_path("/v/f.mp4"),
/// ];
/// let timeline = TimelineBuilder::new().build(&[2, 1, 2, 1], &asset_lookup(&assets));
///
/// let a = timeline.contract(1).unwrap();
/// assert_eq!((a.start_secs, a.end_secs, a.frequency), (30.0, 45.0, 2));
/// assert_eq!(timeline.fillers.len(), 1);
/// ```
pub fn build_timeline(
    playlist: &Playlist,
    assets: &AssetLookup,
    base_url: Option<&str>,
) -> Timeline {
    TimelineBuilder::new()
        .with_resolver(MediaResolver::new(base_url.map(str::to_string)))
        .build(&playlist.sequence, assets)
}
