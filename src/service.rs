//! Playlist lifecycle: generation, persistence and lookup.
//!
//! # Lookup order
//!
//! 1. Owner-specific playlist valid now (if an owner is given).
//! 2. Shared tariff-level playlist valid now.
//! 3. Otherwise a new shared tariff-level playlist is generated.
//!
//! A playlist with an empty sequence (nothing was eligible, or the stored
//! data could not be decoded) is treated as stale and skipped. When the
//! regenerated playlist is empty too, it is returned as-is: the tariff
//! simply has no eligible content.

use rand::Rng;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::kpi::SequenceKpi;
use crate::models::{
    asset_lookup, Asset, AssetId, NewPlaylist, OwnerId, Playlist, PlaylistScope, Tariff,
    Timeline, Timestamp, ValidityWindow,
};
use crate::sequence::SequenceBuilder;
use crate::store::PlaylistStore;
use crate::timeline::{MediaResolver, TimelineBuilder};
use crate::validation::validate_catalogue;

/// A playlist together with its derived timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistView {
    /// The stored playlist.
    pub playlist: Playlist,
    /// Contract offsets and filler metadata.
    pub timeline: Timeline,
}

/// Persists a playlist for `tariff` (and optionally one owner).
///
/// The playlist is valid for `validity_hours` starting at `now`.
///
/// # Errors
/// [`Error::InvalidValidity`] when no validity window of `validity_hours`
/// can start at `now` (zero, or ending past the representable date range),
/// or the store's error.
pub fn build_playlist<S: PlaylistStore>(
    store: &mut S,
    tariff: Tariff,
    sequence: Vec<AssetId>,
    owner: Option<OwnerId>,
    validity_hours: u32,
    now: Timestamp,
) -> Result<Playlist> {
    let scope = PlaylistScope { tariff, owner };
    let draft = NewPlaylist::new(scope, sequence, now, validity_hours)
        .ok_or(Error::InvalidValidity(validity_hours))?;
    let playlist = store.insert(draft, now)?;

    tracing::info!(
        playlist_id = playlist.id,
        tariff = %tariff,
        owner = ?owner,
        entries = playlist.len(),
        valid_until = %playlist.validity.until,
        "Created playlist"
    );

    Ok(playlist)
}

/// Generates, stores and serves playlists over a [`PlaylistStore`].
#[derive(Debug)]
pub struct PlaylistService<S> {
    store: S,
    config: EngineConfig,
    sequences: SequenceBuilder,
    timelines: TimelineBuilder,
}

impl<S: PlaylistStore> PlaylistService<S> {
    /// Creates a service with default configuration.
    pub fn new(store: S) -> Self {
        Self::assemble(store, EngineConfig::default())
    }

    /// Creates a service with the given configuration.
    ///
    /// # Errors
    /// The configuration's [`EngineConfig::validate`] error.
    pub fn with_config(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(store, config))
    }

    fn assemble(store: S, config: EngineConfig) -> Self {
        let sequences = SequenceBuilder::from_config(&config);
        // Timelines always cover one hour, whatever the generation budget
        let timelines =
            TimelineBuilder::new().with_resolver(MediaResolver::new(config.base_url.clone()));
        Self {
            store,
            config,
            sequences,
            timelines,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the service, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Generates a play sequence for `tariff` without storing it.
    ///
    /// Catalogue diagnostics are logged at warn level and do not stop
    /// generation.
    pub fn generate<R: Rng>(
        &self,
        tariff: Tariff,
        catalogue: &[Asset],
        rng: &mut R,
    ) -> Vec<AssetId> {
        if let Err(issues) = validate_catalogue(catalogue, self.config.budget_secs) {
            for issue in &issues {
                tracing::warn!(kind = ?issue.kind, "{}", issue.message);
            }
        }

        let sequence = self.sequences.generate(tariff, catalogue, rng);

        let lookup = asset_lookup(catalogue);
        let kpi = SequenceKpi::calculate(&sequence, &lookup, self.config.budget_secs);
        tracing::debug!(
            tariff = %tariff,
            entries = kpi.entry_count,
            total_secs = kpi.total_secs,
            contract_secs = kpi.contract_secs,
            overshoot_secs = kpi.overshoot_secs,
            "Generated sequence"
        );

        sequence
    }

    /// Generates and stores a new playlist.
    ///
    /// Existing playlists for the scope are superseded, not modified.
    pub fn regenerate<R: Rng>(
        &mut self,
        tariff: Tariff,
        owner: Option<OwnerId>,
        catalogue: &[Asset],
        validity_hours: u32,
        now: Timestamp,
        rng: &mut R,
    ) -> Result<Playlist> {
        if ValidityWindow::hours_from(now, validity_hours).is_none() {
            return Err(Error::InvalidValidity(validity_hours));
        }
        let sequence = self.generate(tariff, catalogue, rng);
        build_playlist(&mut self.store, tariff, sequence, owner, validity_hours, now)
    }

    /// Returns the playlist to play now, generating one if needed.
    pub fn current_playlist<R: Rng>(
        &mut self,
        tariff: Tariff,
        owner: Option<OwnerId>,
        catalogue: &[Asset],
        now: Timestamp,
        rng: &mut R,
    ) -> Result<Playlist> {
        let mut scopes = Vec::with_capacity(2);
        if let Some(owner) = owner {
            scopes.push(PlaylistScope::owner(tariff, owner));
        }
        scopes.push(PlaylistScope::tariff(tariff));

        for scope in &scopes {
            match self.store.find_latest_valid(scope, now)? {
                Some(playlist) if !playlist.is_empty() => return Ok(playlist),
                Some(playlist) => {
                    tracing::info!(playlist_id = playlist.id, "Stored playlist is empty, skipping");
                }
                None => {}
            }
        }

        self.regenerate(tariff, None, catalogue, self.config.validity_hours, now, rng)
    }

    /// Builds the one-hour timeline of a playlist against a catalogue
    /// snapshot.
    pub fn timeline(&self, playlist: &Playlist, catalogue: &[Asset]) -> Timeline {
        self.timelines.build(&playlist.sequence, &asset_lookup(catalogue))
    }

    /// Pairs a playlist with its timeline.
    pub fn view(&self, playlist: Playlist, catalogue: &[Asset]) -> PlaylistView {
        let timeline = self.timeline(&playlist, catalogue);
        PlaylistView { playlist, timeline }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryPlaylistStore, StoreError};
    use crate::timeline::build_timeline;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap()
    }

    fn catalogue() -> Vec<Asset> {
        vec![
            Asset::contract(1)
                .with_duration(15.0)
                .with_plays_per_hour(3)
                .with_file_path("/uploads/videos/a.mp4")
                .with_tariff(Tariff::Standard),
            Asset::filler(10)
                .with_duration(30.0)
                .with_file_path("/uploads/videos/f1.mp4")
                .with_tariffs([Tariff::Standard, Tariff::Comfort]),
            Asset::filler(11)
                .with_duration(25.0)
                .with_file_path("/uploads/videos/f2.mp4")
                .with_tariffs([Tariff::Standard, Tariff::Comfort]),
        ]
    }

    fn service() -> PlaylistService<InMemoryPlaylistStore> {
        PlaylistService::with_config(
            InMemoryPlaylistStore::new(),
            EngineConfig::default().with_base_url("http://media.local"),
        )
        .unwrap()
    }

    /// Store whose every call fails.
    struct BrokenStore;

    impl PlaylistStore for BrokenStore {
        fn insert(
            &mut self,
            _: NewPlaylist,
            _: Timestamp,
        ) -> std::result::Result<Playlist, StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }

        fn find_latest_valid(
            &self,
            _: &PlaylistScope,
            _: Timestamp,
        ) -> std::result::Result<Option<Playlist>, StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
    }

    #[test]
    fn test_build_playlist() {
        let mut store = InMemoryPlaylistStore::new();
        let p =
            build_playlist(&mut store, Tariff::Comfort, vec![10, 11], Some(4), 12, t0()).unwrap();
        assert_eq!(p.scope, PlaylistScope::owner(Tariff::Comfort, 4));
        assert_eq!(p.validity, ValidityWindow::hours_from(t0(), 12).unwrap());
        assert_eq!(p.created_at, t0());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_build_playlist_rejects_zero_validity() {
        let mut store = InMemoryPlaylistStore::new();
        let err = build_playlist(&mut store, Tariff::Comfort, vec![], None, 0, t0()).unwrap_err();
        assert_matches!(err, Error::InvalidValidity(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_build_playlist_rejects_unrepresentable_validity() {
        let mut store = InMemoryPlaylistStore::new();
        let err = build_playlist(&mut store, Tariff::Standard, vec![1], None, u32::MAX, t0())
            .unwrap_err();
        assert_matches!(err, Error::InvalidValidity(u32::MAX));
        assert!(store.is_empty());
    }

    #[test]
    fn test_regenerate_rejects_unrepresentable_validity() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let err = svc
            .regenerate(Tariff::Standard, None, &catalogue(), u32::MAX, t0(), &mut rng)
            .unwrap_err();
        assert_matches!(err, Error::InvalidValidity(_));
        assert!(svc.store().is_empty());
    }

    #[test]
    fn test_with_config_validates() {
        let zero_validity = EngineConfig::default().with_validity_hours(0);
        assert_matches!(
            PlaylistService::with_config(InMemoryPlaylistStore::new(), zero_validity),
            Err(Error::InvalidValidity(0))
        );

        let nan_budget = EngineConfig::default().with_budget_secs(f64::NAN);
        assert_matches!(
            PlaylistService::with_config(InMemoryPlaylistStore::new(), nan_budget),
            Err(Error::Config(_))
        );
    }

    #[test]
    fn test_timeline_horizon_is_one_hour() {
        let config = EngineConfig::default()
            .with_budget_secs(600.0)
            .with_base_url("http://media.local");
        let svc = PlaylistService::with_config(InMemoryPlaylistStore::new(), config).unwrap();
        let p = Playlist {
            id: 1,
            scope: PlaylistScope::tariff(Tariff::Standard),
            sequence: vec![10; 30],
            validity: ValidityWindow::hours_from(t0(), 24).unwrap(),
            created_at: t0(),
        };

        // 30 × 30 s runs past the 600 s budget but stays inside the hour
        let expected = build_timeline(&p, &asset_lookup(&catalogue()), None);
        let view = svc.view(p, &catalogue());
        assert_eq!(view.timeline.total_duration_secs, 3600.0);
        assert_eq!(view.timeline.fillers.len(), 1);
        assert_eq!(view.timeline.fillers[0].asset_id, expected.fillers[0].asset_id);
        assert_eq!(view.timeline.contracts, expected.contracts);
    }

    #[test]
    fn test_current_creates_shared_playlist() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let p = svc
            .current_playlist(Tariff::Standard, Some(7), &catalogue(), t0(), &mut rng)
            .unwrap();
        assert!(p.scope.is_shared());
        assert_eq!(p.sequence.iter().filter(|&&id| id == 1).count(), 3);
        assert_eq!(p.validity.until, t0() + Duration::hours(24));
    }

    #[test]
    fn test_current_reuses_valid_playlist() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let first = svc
            .current_playlist(Tariff::Standard, None, &catalogue(), t0(), &mut rng)
            .unwrap();
        let three_hours = t0() + Duration::hours(3);
        let again = svc
            .current_playlist(Tariff::Standard, None, &catalogue(), three_hours, &mut rng)
            .unwrap();
        assert_eq!(first.id, again.id);
        assert_eq!(svc.store().len(), 1);

        // Expired, so a new playlist is generated
        let next_day = t0() + Duration::hours(24);
        let next_day = svc
            .current_playlist(Tariff::Standard, None, &catalogue(), next_day, &mut rng)
            .unwrap();
        assert_ne!(next_day.id, first.id);
    }

    #[test]
    fn test_owner_playlist_takes_precedence() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        svc.regenerate(Tariff::Standard, None, &catalogue(), 24, t0(), &mut rng)
            .unwrap();
        let own = svc
            .regenerate(Tariff::Standard, Some(7), &catalogue(), 24, t0(), &mut rng)
            .unwrap();

        let for_owner = svc
            .current_playlist(Tariff::Standard, Some(7), &catalogue(), t0(), &mut rng)
            .unwrap();
        assert_eq!(for_owner.id, own.id);

        let for_other = svc
            .current_playlist(Tariff::Standard, Some(8), &catalogue(), t0(), &mut rng)
            .unwrap();
        assert!(for_other.scope.is_shared());
    }

    #[test]
    fn test_malformed_stored_sequence_triggers_regeneration() {
        let mut store = InMemoryPlaylistStore::new();
        let bad = store.insert_raw(
            PlaylistScope::tariff(Tariff::Standard),
            "{broken",
            ValidityWindow::hours_from(t0(), 24).unwrap(),
            t0(),
        );
        let mut svc = PlaylistService::new(store);
        let mut rng = SmallRng::seed_from_u64(42);
        let p = svc
            .current_playlist(Tariff::Standard, None, &catalogue(), t0(), &mut rng)
            .unwrap();
        assert_ne!(p.id, bad);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_no_content_yields_empty_playlist() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let p = svc
            .current_playlist(Tariff::Premium, None, &catalogue(), t0(), &mut rng)
            .unwrap();
        assert!(p.is_empty());
        assert!(svc.timeline(&p, &catalogue()).is_empty());
    }

    #[test]
    fn test_regenerate_supersedes() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let a = svc
            .regenerate(Tariff::Comfort, None, &catalogue(), 24, t0(), &mut rng)
            .unwrap();
        let later = t0() + Duration::minutes(10);
        let b = svc
            .regenerate(Tariff::Comfort, None, &catalogue(), 2, later, &mut rng)
            .unwrap();
        let current = svc
            .current_playlist(Tariff::Comfort, None, &catalogue(), later, &mut rng)
            .unwrap();
        assert_eq!(current.id, b.id);
        assert_ne!(a.id, b.id);

        // b expires after two hours, a is still valid
        let three_hours = t0() + Duration::hours(3);
        let current = svc
            .current_playlist(Tariff::Comfort, None, &catalogue(), three_hours, &mut rng)
            .unwrap();
        assert_eq!(current.id, a.id);
    }

    #[test]
    fn test_regenerate_rejects_zero_validity() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let err = svc
            .regenerate(Tariff::Comfort, None, &catalogue(), 0, t0(), &mut rng)
            .unwrap_err();
        assert_matches!(err, Error::InvalidValidity(0));
    }

    #[test]
    fn test_view_resolves_media() {
        let mut svc = service();
        let mut rng = SmallRng::seed_from_u64(42);
        let p = svc
            .current_playlist(Tariff::Standard, None, &catalogue(), t0(), &mut rng)
            .unwrap();
        let view = svc.view(p, &catalogue());

        let a = view.timeline.contract(1).unwrap();
        assert_eq!(a.frequency, 3);
        assert_eq!(a.start_secs, 0.0);
        assert_eq!(a.media_url, "http://media.local/uploads/videos/a.mp4");
        assert_eq!(view.timeline.fillers.len(), 2);
        assert_eq!(view.timeline.total_duration_secs, 3600.0);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["playlist"]["sequence"].is_array());
    }

    #[test]
    fn test_store_errors_propagate() {
        let mut svc = PlaylistService::new(BrokenStore);
        let mut rng = SmallRng::seed_from_u64(42);
        let err = svc
            .current_playlist(Tariff::Standard, None, &catalogue(), t0(), &mut rng)
            .unwrap_err();
        assert_matches!(err, Error::Store(StoreError::Backend(_)));
    }
}
