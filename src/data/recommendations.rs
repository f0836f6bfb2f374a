//! Recommendation acquisition: seed cascade, request, filtering, fallback
//!
//! Steps run strictly one after another. A failing step is logged and the
//! cascade moves on; only `Unauthorized` escapes, everything else ends in
//! either a live batch or the bundled demo cards.

use super::demo_tracks::demo_tracks;
use crate::api::{CatalogApi, CatalogError, CatalogResult, RecommendationFilters, SeedSpec, TimeWindow};
use crate::constants::{
    DEFAULT_MARKET, DIVERSITY_ARTIST_ID, FALLBACK_ARTIST_IDS, MAX_SEEDS, MIN_POPULARITY,
    RECOMMENDATIONS_LIMIT, SEED_LOOKUP_LIMIT,
};
use crate::models::Track;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub seed_lookup_limit: u32,
    pub max_seeds: usize,
    pub recommendations_limit: u32,
    pub min_popularity: u8,
    pub default_market: String,
    /// Swap one track seed for a fixed popular artist
    pub diversify_seeds: bool,
    /// Keep only tracks with a preview, unless that would keep nothing
    pub prefer_playable: bool,
    pub fallback_artists: Vec<String>,
    pub diversity_artist: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            seed_lookup_limit: SEED_LOOKUP_LIMIT,
            max_seeds: MAX_SEEDS,
            recommendations_limit: RECOMMENDATIONS_LIMIT,
            min_popularity: MIN_POPULARITY,
            default_market: DEFAULT_MARKET.to_string(),
            diversify_seeds: false,
            prefer_playable: true,
            fallback_artists: FALLBACK_ARTIST_IDS.iter().map(|s| s.to_string()).collect(),
            diversity_artist: DIVERSITY_ARTIST_ID.to_string(),
        }
    }
}

/// Where the seeds of a batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    TopTracks(TimeWindow),
    TopArtists(TimeWindow),
    Curated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationBatch {
    pub tracks: Vec<Track>,
    /// Demo cards instead of live results
    pub degraded: bool,
    pub seed_source: Option<SeedSource>,
}

pub struct RecommendationPipeline {
    catalog: Arc<dyn CatalogApi>,
    settings: PipelineSettings,
}

impl RecommendationPipeline {
    pub fn new(catalog: Arc<dyn CatalogApi>, settings: PipelineSettings) -> Self {
        Self { catalog, settings }
    }

    /// Produce a complete batch of cards. Never fails except on `Unauthorized`;
    /// total failure yields the demo cards with `degraded` set.
    pub async fn load_recommendations(
        &self,
        token: &str,
        market: Option<&str>,
        excluded_ids: &HashSet<String>,
    ) -> CatalogResult<RecommendationBatch> {
        match self.fetch_live(token, market, excluded_ids).await {
            Ok(batch) => Ok(batch),
            Err(CatalogError::Unauthorized) => Err(CatalogError::Unauthorized),
            Err(e) => {
                log::warn!("[Pipeline] Live recommendations unavailable ({}), using demo tracks", e);
                Ok(RecommendationBatch {
                    tracks: unseen_demo_tracks(excluded_ids),
                    degraded: true,
                    seed_source: None,
                })
            }
        }
    }

    async fn fetch_live(
        &self,
        token: &str,
        market: Option<&str>,
        excluded_ids: &HashSet<String>,
    ) -> CatalogResult<RecommendationBatch> {
        let (seeds, source) = self.resolve_seeds(token).await?;
        if seeds.is_empty() {
            return Err(CatalogError::empty("no seeds available"));
        }
        let filters = RecommendationFilters {
            limit: self.settings.recommendations_limit,
            market: market
                .filter(|m| !m.is_empty())
                .unwrap_or(self.settings.default_market.as_str())
                .to_string(),
            min_popularity: self.settings.min_popularity,
        };

        log::info!(
            "[Pipeline] Requesting recommendations seeded from {:?} ({} seed(s))",
            source,
            seeds.total()
        );
        let raw = self.catalog.get_recommendations(token, &seeds, &filters).await?;
        if raw.is_empty() {
            return Err(CatalogError::empty("recommendations response had no tracks"));
        }

        let received = raw.len();
        let tracks = filter_candidates(raw, excluded_ids, self.settings.prefer_playable);
        if tracks.is_empty() {
            return Err(CatalogError::empty("every recommendation was already loved"));
        }

        log::info!("[Pipeline] Kept {} of {} recommended tracks", tracks.len(), received);
        Ok(RecommendationBatch {
            tracks,
            degraded: false,
            seed_source: Some(source),
        })
    }

    /// Top tracks by window, then top artists by window, then the curated list
    async fn resolve_seeds(&self, token: &str) -> CatalogResult<(SeedSpec, SeedSource)> {
        if let Some((window, ids)) = self.seed_from_top_tracks(token).await? {
            return Ok((self.track_seeds(ids), SeedSource::TopTracks(window)));
        }
        if let Some((window, ids)) = self.seed_from_top_artists(token).await? {
            return Ok((SeedSpec::artists(ids), SeedSource::TopArtists(window)));
        }

        log::info!("[Pipeline] No listening history available, using curated artist seeds");
        let curated = self
            .settings
            .fallback_artists
            .iter()
            .take(self.settings.max_seeds)
            .cloned()
            .collect();
        Ok((SeedSpec::artists(curated), SeedSource::Curated))
    }

    async fn seed_from_top_tracks(&self, token: &str) -> CatalogResult<Option<(TimeWindow, Vec<String>)>> {
        for window in TimeWindow::PREFERRED_ORDER {
            match self
                .catalog
                .get_top_tracks(token, window, self.settings.seed_lookup_limit)
                .await
            {
                Ok(tracks) if !tracks.is_empty() => {
                    let ids = tracks
                        .into_iter()
                        .map(|t| t.id)
                        .take(self.settings.max_seeds)
                        .collect();
                    return Ok(Some((window, ids)));
                }
                Ok(_) => log::debug!("[Pipeline] No top tracks for {}", window.as_query()),
                Err(CatalogError::Unauthorized) => return Err(CatalogError::Unauthorized),
                Err(e) => log::warn!("[Pipeline] Top tracks ({}) failed: {}", window.as_query(), e),
            }
        }
        Ok(None)
    }

    async fn seed_from_top_artists(&self, token: &str) -> CatalogResult<Option<(TimeWindow, Vec<String>)>> {
        for window in TimeWindow::PREFERRED_ORDER {
            match self
                .catalog
                .get_top_artists(token, window, self.settings.seed_lookup_limit)
                .await
            {
                Ok(artists) if !artists.is_empty() => {
                    let ids = artists
                        .into_iter()
                        .map(|a| a.id)
                        .take(self.settings.max_seeds)
                        .collect();
                    return Ok(Some((window, ids)));
                }
                Ok(_) => log::debug!("[Pipeline] No top artists for {}", window.as_query()),
                Err(CatalogError::Unauthorized) => return Err(CatalogError::Unauthorized),
                Err(e) => log::warn!("[Pipeline] Top artists ({}) failed: {}", window.as_query(), e),
            }
        }
        Ok(None)
    }

    fn track_seeds(&self, mut ids: Vec<String>) -> SeedSpec {
        if !self.settings.diversify_seeds {
            ids.truncate(self.settings.max_seeds);
            return SeedSpec::tracks(ids);
        }
        // The endpoint takes at most `max_seeds` seeds across all kinds
        ids.truncate(self.settings.max_seeds.saturating_sub(1).max(1));
        SeedSpec {
            tracks: ids,
            artists: vec![self.settings.diversity_artist.clone()],
        }
    }
}

/// Demo cards not loved yet; the full set once every one of them has been
fn unseen_demo_tracks(excluded_ids: &HashSet<String>) -> Vec<Track> {
    let fresh = filter_candidates(demo_tracks(), excluded_ids, false);
    if fresh.is_empty() {
        demo_tracks()
    } else {
        fresh
    }
}

/// Drop already-loved and duplicate ids (order preserved), then optionally
/// prefer tracks with a playable preview
pub fn filter_candidates(
    tracks: Vec<Track>,
    excluded_ids: &HashSet<String>,
    prefer_playable: bool,
) -> Vec<Track> {
    let mut seen = HashSet::new();
    let fresh: Vec<Track> = tracks
        .into_iter()
        .filter(|t| !excluded_ids.contains(&t.id) && seen.insert(t.id.clone()))
        .collect();

    if !prefer_playable {
        return fresh;
    }

    let playable: Vec<Track> = fresh.iter().filter(|t| t.has_preview()).cloned().collect();
    if playable.is_empty() {
        log::debug!("[Pipeline] No previews in batch, keeping unfiltered tracks");
        fresh
    } else {
        playable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    fn with_preview(id: &str) -> Track {
        let mut track = Track::mock(id, "t", "a");
        track.preview_url = Some(format!("https://p.scdn.co/{}", id));
        track
    }

    #[test]
    fn drops_loved_ids_and_keeps_order() {
        let raw = ["a", "x", "b", "c", "d"].map(|id| Track::mock(id, "t", "a")).to_vec();
        let loved: HashSet<String> = ["x".to_string()].into();

        let kept = filter_candidates(raw, &loved, true);
        assert_eq!(ids(&kept), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn drops_duplicate_ids() {
        let raw = ["a", "b", "a"].map(|id| Track::mock(id, "t", "a")).to_vec();
        let kept = filter_candidates(raw, &HashSet::new(), false);
        assert_eq!(ids(&kept), vec!["a", "b"]);
    }

    #[test]
    fn prefers_playable_when_available() {
        let raw = vec![Track::mock("a", "t", "a"), with_preview("b"), with_preview("c")];
        let kept = filter_candidates(raw, &HashSet::new(), true);
        assert_eq!(ids(&kept), vec!["b", "c"]);
    }

    #[test]
    fn playable_preference_can_be_disabled() {
        let raw = vec![Track::mock("a", "t", "a"), with_preview("b")];
        let kept = filter_candidates(raw, &HashSet::new(), false);
        assert_eq!(ids(&kept), vec!["a", "b"]);
    }

    #[test]
    fn demo_cards_skip_loved_ones() {
        let loved: HashSet<String> = ["demo_1".to_string(), "demo_3".to_string()].into();
        assert_eq!(ids(&unseen_demo_tracks(&loved)), vec!["demo_2", "demo_4", "demo_5"]);
    }

    #[test]
    fn all_demo_cards_loved_shows_them_again() {
        let loved: HashSet<String> = demo_tracks().into_iter().map(|t| t.id).collect();
        assert_eq!(unseen_demo_tracks(&loved).len(), 5);
    }

    #[test]
    fn everything_loved_yields_empty() {
        let raw = vec![Track::mock("a", "t", "a")];
        let loved: HashSet<String> = ["a".to_string()].into();
        assert!(filter_candidates(raw, &loved, true).is_empty());
    }
}
