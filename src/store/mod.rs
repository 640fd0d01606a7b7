//! Playlist persistence seam.
//!
//! The scheduler does not own storage. Embedders implement
//! [`PlaylistStore`] over their database; [`InMemoryPlaylistStore`] is a
//! reference adapter for tests and single-process use.
//!
//! # Contract
//!
//! - Append-only: playlists are inserted, never updated or deleted.
//! - `find_latest_valid` returns the most recently inserted playlist whose
//!   scope matches exactly and whose validity window contains the instant.
//! - Sequences that cannot be decoded read back as empty.

mod codec;
mod memory;

pub use codec::{decode_sequence, decode_sequence_lossy, encode_sequence, CodecError};
pub use memory::InMemoryPlaylistStore;

use crate::models::{NewPlaylist, Playlist, PlaylistScope, Timestamp};

/// Storage failure reported by a [`PlaylistStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Sequence could not be encoded for storage.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Append-only playlist storage.
pub trait PlaylistStore {
    /// Persists a new playlist and returns it with its assigned id.
    fn insert(
        &mut self,
        playlist: NewPlaylist,
        created_at: Timestamp,
    ) -> Result<Playlist, StoreError>;

    /// Finds the most recent playlist for `scope` valid at `at`.
    fn find_latest_valid(
        &self,
        scope: &PlaylistScope,
        at: Timestamp,
    ) -> Result<Option<Playlist>, StoreError>;
}
