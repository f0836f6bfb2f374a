// Profile and listening-history endpoints
use super::client::SpotifyClient;
use super::errors::CatalogResult;
use super::TimeWindow;
use crate::models::{ArtistObject, PagingResponse, Track, TrackObject, UserProfile};

impl SpotifyClient {
    pub async fn fetch_profile(&self, token: &str) -> CatalogResult<UserProfile> {
        log::debug!("[Me] Fetching profile");
        self.send_json(self.get("/me", token), "Profile").await
    }

    pub async fn fetch_top_tracks(
        &self,
        token: &str,
        window: TimeWindow,
        limit: u32,
    ) -> CatalogResult<Vec<Track>> {
        log::debug!("[Me] Fetching top tracks ({}, limit {})", window.as_query(), limit);

        let request = self
            .get("/me/top/tracks", token)
            .query(&[("limit", limit.to_string()), ("time_range", window.as_query().to_string())]);
        let page: PagingResponse<TrackObject> = self.send_json(request, "Top tracks").await?;

        Ok(page.items.into_iter().map(Track::from).collect())
    }

    pub async fn fetch_top_artists(
        &self,
        token: &str,
        window: TimeWindow,
        limit: u32,
    ) -> CatalogResult<Vec<ArtistObject>> {
        log::debug!("[Me] Fetching top artists ({}, limit {})", window.as_query(), limit);

        let request = self
            .get("/me/top/artists", token)
            .query(&[("limit", limit.to_string()), ("time_range", window.as_query().to_string())]);
        let page: PagingResponse<ArtistObject> = self.send_json(request, "Top artists").await?;

        Ok(page.items)
    }
}
