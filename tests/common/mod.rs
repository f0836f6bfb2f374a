//! Scripted catalog shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use swipers::api::{
    CatalogApi, CatalogError, CatalogResult, RecommendationFilters, SeedSpec, TimeWindow,
};
use swipers::models::{AlbumKind, ArtistObject, RemotePlaylist, Track, UserProfile};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Profile,
    TopTracks(TimeWindow),
    TopArtists(TimeWindow),
    Recommendations { seeds: SeedSpec, filters: RecommendationFilters },
    CreatePlaylist { owner_id: String, name: String },
    Append { playlist_id: String, uris: Vec<String> },
}

/// Answers from canned results and records every call in order.
///
/// Windows without a scripted answer return an empty list; playlist calls
/// without a scripted answer succeed.
pub struct FakeCatalog {
    profile: Mutex<CatalogResult<UserProfile>>,
    top_tracks: Mutex<HashMap<TimeWindow, CatalogResult<Vec<Track>>>>,
    top_artists: Mutex<HashMap<TimeWindow, CatalogResult<Vec<ArtistObject>>>>,
    recommendations: Mutex<CatalogResult<Vec<Track>>>,
    create_results: Mutex<VecDeque<CatalogResult<RemotePlaylist>>>,
    append_results: Mutex<VecDeque<CatalogResult<String>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            profile: Mutex::new(Ok(profile("listener", Some("DE")))),
            top_tracks: Mutex::new(HashMap::new()),
            top_artists: Mutex::new(HashMap::new()),
            recommendations: Mutex::new(Ok(Vec::new())),
            create_results: Mutex::new(VecDeque::new()),
            append_results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every endpoint fails with a server error
    pub fn failing() -> Self {
        let fake = Self::new();
        fake.set_profile(Err(CatalogError::Api { status: 500 }));
        for window in TimeWindow::PREFERRED_ORDER {
            fake.set_top_tracks(window, Err(CatalogError::Api { status: 500 }));
            fake.set_top_artists(window, Err(CatalogError::Api { status: 500 }));
        }
        fake.set_recommendations(Err(CatalogError::Api { status: 500 }));
        fake
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_profile(&self, result: CatalogResult<UserProfile>) {
        *self.profile.lock().unwrap() = result;
    }

    pub fn set_top_tracks(&self, window: TimeWindow, result: CatalogResult<Vec<Track>>) {
        self.top_tracks.lock().unwrap().insert(window, result);
    }

    pub fn set_top_artists(&self, window: TimeWindow, result: CatalogResult<Vec<ArtistObject>>) {
        self.top_artists.lock().unwrap().insert(window, result);
    }

    pub fn set_recommendations(&self, result: CatalogResult<Vec<Track>>) {
        *self.recommendations.lock().unwrap() = result;
    }

    pub fn push_create(&self, result: CatalogResult<RemotePlaylist>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn push_append(&self, result: CatalogResult<String>) {
        self.append_results.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn recommendation_calls(&self) -> Vec<(SeedSpec, RecommendationFilters)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Recommendations { seeds, filters } => Some((seeds, filters)),
                _ => None,
            })
            .collect()
    }

    pub fn appends(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Append { playlist_id, uris } => Some((playlist_id, uris)),
                _ => None,
            })
            .collect()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreatePlaylist { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn get_profile(&self, _token: &str) -> CatalogResult<UserProfile> {
        self.record(Call::Profile);
        self.profile.lock().unwrap().clone()
    }

    async fn get_top_tracks(
        &self,
        _token: &str,
        window: TimeWindow,
        _limit: u32,
    ) -> CatalogResult<Vec<Track>> {
        self.record(Call::TopTracks(window));
        self.top_tracks
            .lock()
            .unwrap()
            .get(&window)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn get_top_artists(
        &self,
        _token: &str,
        window: TimeWindow,
        _limit: u32,
    ) -> CatalogResult<Vec<ArtistObject>> {
        self.record(Call::TopArtists(window));
        self.top_artists
            .lock()
            .unwrap()
            .get(&window)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn get_recommendations(
        &self,
        _token: &str,
        seeds: &SeedSpec,
        filters: &RecommendationFilters,
    ) -> CatalogResult<Vec<Track>> {
        self.record(Call::Recommendations {
            seeds: seeds.clone(),
            filters: filters.clone(),
        });
        self.recommendations.lock().unwrap().clone()
    }

    async fn create_playlist(
        &self,
        _token: &str,
        owner_id: &str,
        name: &str,
        _description: &str,
    ) -> CatalogResult<RemotePlaylist> {
        self.record(Call::CreatePlaylist {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
        });
        let created = self.creates();
        self.create_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(RemotePlaylist {
                    id: format!("pl_{}", created),
                    name: name.to_string(),
                    uri: None,
                })
            })
    }

    async fn append_to_playlist(
        &self,
        _token: &str,
        playlist_id: &str,
        track_uris: &[String],
    ) -> CatalogResult<String> {
        self.record(Call::Append {
            playlist_id: playlist_id.to_string(),
            uris: track_uris.to_vec(),
        });
        self.append_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("snapshot".to_string()))
    }
}

pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Song {}", id),
        artist_names: vec!["Some Artist".to_string()],
        album_name: "Some Album".to_string(),
        album_kind: AlbumKind::Album,
        image_url: None,
        popularity: 60,
        preview_url: Some(format!("https://p.scdn.co/mp3-preview/{}", id)),
        uri: format!("spotify:track:{}", id),
        external_url: format!("https://open.spotify.com/track/{}", id),
    }
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn artist(id: &str) -> ArtistObject {
    ArtistObject {
        id: id.to_string(),
        name: format!("Artist {}", id),
    }
}

pub fn profile(id: &str, country: Option<&str>) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        display_name: Some("Test Listener".to_string()),
        country: country.map(str::to_string),
        images: Vec::new(),
    }
}

pub fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}
