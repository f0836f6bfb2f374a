// Raw response shapes from the Spotify Web API.
// Converted into domain types at the client boundary so the rest of the
// app never touches nested API objects.
use super::user::Image;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlbumObject {
    pub name: String,
    pub album_type: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: AlbumObject,
    #[serde(default)]
    pub popularity: u32,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
}

/// Paged list wrapper used by the `/me/top/*` endpoints
#[derive(Debug, Deserialize)]
pub struct PagingResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}
