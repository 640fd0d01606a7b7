//! Hourly playlist scheduling for in-vehicle digital signage.
//!
//! Arranges a catalogue of video assets into a one-hour playback cycle per
//! service tariff: contract spots at their required hourly frequency,
//! filler spots padding the remaining time, contract plays spread evenly
//! across the hour. Stored playlists can be expanded into a timeline with
//! start/end offsets for each contract spot.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Asset`, `Tariff`, `Playlist`, `Timeline`)
//! - **`selection`**: Eligible contract/filler sets for a tariff
//! - **`sequence`**: Budget-constrained sequence construction and even distribution
//! - **`timeline`**: Offsets, repeat counts and media locations from a sequence
//! - **`store`**: Append-only playlist persistence seam and sequence codec
//! - **`service`**: Current-playlist lookup, regeneration, timeline views
//! - **`validation`**: Catalogue diagnostics
//! - **`kpi`**: Airtime metrics of a sequence
//!
//! # Architecture
//!
//! Selection → sequence construction → store write; later store read →
//! timeline. The engine is synchronous and owns no shared state; randomness
//! is always injected by the caller.

pub mod config;
pub mod error;
pub mod kpi;
pub mod models;
pub mod selection;
pub mod sequence;
pub mod service;
pub mod store;
pub mod timeline;
pub mod validation;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use sequence::generate_sequence;
pub use service::{build_playlist, PlaylistService, PlaylistView};
pub use timeline::build_timeline;

/// Length of one playback cycle (s).
pub const HOUR_SECS: f64 = 3600.0;

/// Safety cap on entries produced by one fill run.
pub const DEFAULT_MAX_ENTRIES: usize = 5000;
