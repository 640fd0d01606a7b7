//! Playlist model.
//!
//! A playlist is a persisted, time-bounded sequence of asset ids for a
//! tariff (shared) or for a single owner. Playlists are immutable once
//! created; regeneration produces a new one that supersedes the old.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{AssetId, Tariff};

/// Store-assigned playlist identifier.
pub type PlaylistId = i64;

/// Identifier of an individual playlist owner (a vehicle).
pub type OwnerId = i64;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Lookup scope of a playlist: tariff-level or owner-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistScope {
    /// Tariff the playlist was generated for.
    pub tariff: Tariff,
    /// `None` = shared tariff-level playlist.
    pub owner: Option<OwnerId>,
}

impl PlaylistScope {
    /// Shared scope for a tariff.
    pub fn tariff(tariff: Tariff) -> Self {
        Self {
            tariff,
            owner: None,
        }
    }

    /// Owner-specific scope.
    pub fn owner(tariff: Tariff, owner: OwnerId) -> Self {
        Self {
            tariff,
            owner: Some(owner),
        }
    }

    /// Whether this is a shared tariff-level scope.
    pub fn is_shared(&self) -> bool {
        self.owner.is_none()
    }
}

/// Half-open validity window `[from, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// First instant the playlist is valid.
    pub from: Timestamp,
    /// First instant the playlist is no longer valid.
    pub until: Timestamp,
}

impl ValidityWindow {
    /// Window starting at `from` lasting `hours`.
    ///
    /// Returns `None` for a zero-length window or when the end lies beyond
    /// the representable date range.
    pub fn hours_from(from: Timestamp, hours: u32) -> Option<Self> {
        if hours == 0 {
            return None;
        }
        let until = Duration::try_hours(i64::from(hours))
            .and_then(|span| from.checked_add_signed(span))?;
        Some(Self { from, until })
    }

    /// Whether `at` falls inside the window.
    #[inline]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.from <= at && at < self.until
    }
}

/// A playlist ready to be written to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlaylist {
    /// Tariff and optional owner.
    pub scope: PlaylistScope,
    /// Ordered asset ids (playback order).
    pub sequence: Vec<AssetId>,
    /// Validity window.
    pub validity: ValidityWindow,
}

/// A persisted playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Store-assigned id.
    pub id: PlaylistId,
    /// Tariff and optional owner.
    pub scope: PlaylistScope,
    /// Ordered asset ids (playback order).
    pub sequence: Vec<AssetId>,
    /// Validity window.
    pub validity: ValidityWindow,
    /// Creation instant.
    pub created_at: Timestamp,
}

impl NewPlaylist {
    /// Creates a playlist draft valid for `hours` from `now`.
    ///
    /// `None` when no such window exists (see [`ValidityWindow::hours_from`]).
    pub fn new(
        scope: PlaylistScope,
        sequence: Vec<AssetId>,
        now: Timestamp,
        hours: u32,
    ) -> Option<Self> {
        Some(Self {
            scope,
            sequence,
            validity: ValidityWindow::hours_from(now, hours)?,
        })
    }
}

impl Playlist {
    /// Tariff of the playlist.
    pub fn tariff(&self) -> Tariff {
        self.scope.tariff
    }

    /// Owner of the playlist, `None` for shared playlists.
    pub fn owner(&self) -> Option<OwnerId> {
        self.scope.owner
    }

    /// Whether the playlist is valid at `at`.
    pub fn is_valid_at(&self, at: Timestamp) -> bool {
        self.validity.contains(at)
    }

    /// Whether the sequence has no entries.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of entries in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
}
