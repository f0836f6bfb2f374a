// Spotify Web API client modules

pub mod client;
pub mod errors;
pub mod me;
pub mod playlists;
pub mod recommendations;

use crate::models::{ArtistObject, RemotePlaylist, Track, UserProfile};
use async_trait::async_trait;

// Re-export commonly used types
pub use client::SpotifyClient;
pub use errors::{CatalogError, CatalogResult};

/// Listening-history recency window for the `/me/top/*` endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    Short,
    Medium,
    Long,
}

impl TimeWindow {
    /// Most recent first, the order the seeding cascade walks
    pub const PREFERRED_ORDER: [TimeWindow; 3] =
        [TimeWindow::Short, TimeWindow::Medium, TimeWindow::Long];

    pub fn as_query(&self) -> &'static str {
        match self {
            TimeWindow::Short => "short_term",
            TimeWindow::Medium => "medium_term",
            TimeWindow::Long => "long_term",
        }
    }
}

/// Seeds for `/recommendations`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSpec {
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
}

impl SeedSpec {
    pub fn tracks(ids: Vec<String>) -> Self {
        Self { tracks: ids, artists: Vec::new() }
    }

    pub fn artists(ids: Vec<String>) -> Self {
        Self { tracks: Vec::new(), artists: ids }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.artists.is_empty()
    }

    pub fn total(&self) -> usize {
        self.tracks.len() + self.artists.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationFilters {
    pub limit: u32,
    pub market: String,
    pub min_popularity: u8,
}

/// Authenticated operations against the remote music catalog.
///
/// Every call takes the current access token. Implementations map HTTP 401
/// to [`CatalogError::Unauthorized`] and never retry; retry policy lives in
/// the recommendation pipeline.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_profile(&self, token: &str) -> CatalogResult<UserProfile>;

    async fn get_top_tracks(
        &self,
        token: &str,
        window: TimeWindow,
        limit: u32,
    ) -> CatalogResult<Vec<Track>>;

    async fn get_top_artists(
        &self,
        token: &str,
        window: TimeWindow,
        limit: u32,
    ) -> CatalogResult<Vec<ArtistObject>>;

    async fn get_recommendations(
        &self,
        token: &str,
        seeds: &SeedSpec,
        filters: &RecommendationFilters,
    ) -> CatalogResult<Vec<Track>>;

    async fn create_playlist(
        &self,
        token: &str,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<RemotePlaylist>;

    /// Returns the playlist snapshot id
    async fn append_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        track_uris: &[String],
    ) -> CatalogResult<String>;
}
