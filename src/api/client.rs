use super::errors::{CatalogError, CatalogResult};
use super::{CatalogApi, RecommendationFilters, SeedSpec, TimeWindow};
use crate::models::{ArtistObject, RemotePlaylist, Track, UserProfile};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin typed wrapper over the Spotify Web API.
///
/// Holds one pooled `reqwest::Client`; endpoint groups live in `me.rs`,
/// `recommendations.rs` and `playlists.rs`.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new() -> Self {
        Self::with_base_url(crate::constants::API_BASE_URL)
    }

    /// Point the client at a different API root (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[Catalog] Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(token)
    }

    pub(crate) fn post(&self, path: &str, token: &str) -> RequestBuilder {
        self.http.post(self.url(path)).bearer_auth(token)
    }

    /// Send a request and decode its JSON body, mapping failures onto the
    /// catalog error taxonomy
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> CatalogResult<T> {
        let response = request.send().await.map_err(|e| {
            log::warn!("[Catalog] {} request failed: {}", context, e);
            CatalogError::Network(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("[Catalog] {} rejected: token unauthorized", context);
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            log::warn!("[Catalog] {} returned status: {}", context, status);
            return Err(CatalogError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("[Catalog] {} body could not be decoded: {}", context, e);
            CatalogError::Decode(e.to_string())
        })
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn get_profile(&self, token: &str) -> CatalogResult<UserProfile> {
        self.fetch_profile(token).await
    }

    async fn get_top_tracks(
        &self,
        token: &str,
        window: TimeWindow,
        limit: u32,
    ) -> CatalogResult<Vec<Track>> {
        self.fetch_top_tracks(token, window, limit).await
    }

    async fn get_top_artists(
        &self,
        token: &str,
        window: TimeWindow,
        limit: u32,
    ) -> CatalogResult<Vec<ArtistObject>> {
        self.fetch_top_artists(token, window, limit).await
    }

    async fn get_recommendations(
        &self,
        token: &str,
        seeds: &SeedSpec,
        filters: &RecommendationFilters,
    ) -> CatalogResult<Vec<Track>> {
        self.fetch_recommendations(token, seeds, filters).await
    }

    async fn create_playlist(
        &self,
        token: &str,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<RemotePlaylist> {
        self.create_private_playlist(token, owner_id, name, description)
            .await
    }

    async fn append_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        track_uris: &[String],
    ) -> CatalogResult<String> {
        self.add_tracks(token, playlist_id, track_uris).await
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::serve;
    use super::*;

    #[tokio::test]
    async fn maps_401_to_unauthorized() {
        let (base, _seen) = serve(vec![(401, r#"{"error":{"status":401}}"#)]);
        let client = SpotifyClient::with_base_url(base);

        let err = client.get_profile("stale").await.unwrap_err();
        assert_eq!(err, CatalogError::Unauthorized);
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn maps_other_failures_to_api_error() {
        let (base, _seen) = serve(vec![(429, "slow down")]);
        let client = SpotifyClient::with_base_url(base);

        let err = client.get_profile("tok").await.unwrap_err();
        assert_eq!(err, CatalogError::Api { status: 429 });
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (base, _seen) = serve(vec![(200, "{not json")]);
        let client = SpotifyClient::with_base_url(base);

        let err = client.get_profile("tok").await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_failure() {
        // Bind then drop to get a port nobody listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = SpotifyClient::with_base_url(format!("http://127.0.0.1:{}", port));

        let err = client.get_profile("tok").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[tokio::test]
    async fn attaches_bearer_header() {
        let (base, seen) = serve(vec![(200, r#"{"id":"u1","display_name":"Ana","country":"SE"}"#)]);
        let client = SpotifyClient::with_base_url(base);

        let profile = client.get_profile("secret-token").await.unwrap();
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.country.as_deref(), Some("SE"));

        let request = seen.recv().unwrap();
        assert_eq!(request.url, "/me");
        assert_eq!(request.authorization.as_deref(), Some("Bearer secret-token"));
    }
}
