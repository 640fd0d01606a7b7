//! Signage scheduling domain models.
//!
//! Provides the data types shared by every stage of playlist generation:
//! catalogue assets, tariffs, persisted playlists and the derived timeline.
//!
//! # Domain Mappings
//!
//! | signage-schedule | Scheduling theory | Broadcast |
//! |------------------|-------------------|-----------|
//! | Asset | Job | Spot |
//! | Play entry | Operation | Insertion |
//! | Playlist | Schedule | Log / rundown |
//! | Timeline | Gantt view | As-run plan |

mod asset;
mod playlist;
mod tariff;
mod timeline;

pub use asset::{asset_lookup, Asset, AssetId, AssetKind, AssetLookup};
pub use playlist::{
    NewPlaylist, OwnerId, Playlist, PlaylistId, PlaylistScope, Timestamp, ValidityWindow,
};
pub use tariff::{Tariff, UnknownTariff};
pub use timeline::{ContractTimelineItem, FillerTimelineItem, Timeline};
