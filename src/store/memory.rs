//! In-memory playlist store.

use super::{decode_sequence_lossy, encode_sequence, PlaylistStore, StoreError};
use crate::models::{NewPlaylist, Playlist, PlaylistId, PlaylistScope, Timestamp, ValidityWindow};

/// Stored row; the sequence is kept in its encoded form.
#[derive(Debug, Clone)]
struct PlaylistRecord {
    id: PlaylistId,
    scope: PlaylistScope,
    encoded_sequence: String,
    validity: ValidityWindow,
    created_at: Timestamp,
}

impl PlaylistRecord {
    fn to_playlist(&self) -> Playlist {
        Playlist {
            id: self.id,
            scope: self.scope,
            sequence: decode_sequence_lossy(&self.encoded_sequence),
            validity: self.validity,
            created_at: self.created_at,
        }
    }
}

/// Append-only playlist store backed by a `Vec`.
///
/// Records are kept in insertion order; later inserts win lookups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlaylistStore {
    records: Vec<PlaylistRecord>,
}

impl InMemoryPlaylistStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored playlists.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stores a playlist whose sequence is already encoded, as read from a
    /// foreign database. The text is not validated.
    pub fn insert_raw(
        &mut self,
        scope: PlaylistScope,
        encoded_sequence: impl Into<String>,
        validity: ValidityWindow,
        created_at: Timestamp,
    ) -> PlaylistId {
        let id = self.next_id();
        self.records.push(PlaylistRecord {
            id,
            scope,
            encoded_sequence: encoded_sequence.into(),
            validity,
            created_at,
        });
        id
    }

    /// Fetches a playlist by id.
    pub fn get(&self, id: PlaylistId) -> Option<Playlist> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(PlaylistRecord::to_playlist)
    }

    fn next_id(&self) -> PlaylistId {
        self.records.last().map_or(1, |r| r.id + 1)
    }
}

impl PlaylistStore for InMemoryPlaylistStore {
    fn insert(
        &mut self,
        playlist: NewPlaylist,
        created_at: Timestamp,
    ) -> Result<Playlist, StoreError> {
        let encoded = encode_sequence(&playlist.sequence)?;
        let id = self.insert_raw(playlist.scope, encoded, playlist.validity, created_at);

        tracing::debug!(
            playlist_id = id,
            tariff = %playlist.scope.tariff,
            owner = ?playlist.scope.owner,
            entries = playlist.sequence.len(),
            "Stored playlist"
        );

        Ok(Playlist {
            id,
            scope: playlist.scope,
            sequence: playlist.sequence,
            validity: playlist.validity,
            created_at,
        })
    }

    fn find_latest_valid(
        &self,
        scope: &PlaylistScope,
        at: Timestamp,
    ) -> Result<Option<Playlist>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.scope == *scope && r.validity.contains(at))
            // Ties resolve to the last inserted record
            .max_by_key(|r| r.created_at)
            .map(PlaylistRecord::to_playlist))
    }
}
