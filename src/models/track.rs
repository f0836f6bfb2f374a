use super::responses::TrackObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlbumKind {
    Album,
    Single,
    Compilation,
}

impl AlbumKind {
    /// Maps the API `album_type` string; anything unrecognised is treated as an album
    pub fn from_api(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("single") => AlbumKind::Single,
            Some("compilation") => AlbumKind::Compilation,
            _ => AlbumKind::Album,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumKind::Album => "album",
            AlbumKind::Single => "single",
            AlbumKind::Compilation => "compilation",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_names: Vec<String>,
    pub album_name: String,
    pub album_kind: AlbumKind,
    pub image_url: Option<String>,
    pub popularity: u8, // 0-100
    pub preview_url: Option<String>,
    pub uri: String, // spotify:track:<id>, used for playlist appends
    pub external_url: String,
}

impl Track {
    pub fn artists_joined(&self) -> String {
        self.artist_names.join(", ")
    }

    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl From<TrackObject> for Track {
    fn from(raw: TrackObject) -> Self {
        let uri = raw
            .uri
            .unwrap_or_else(|| format!("spotify:track:{}", raw.id));
        Self {
            album_kind: AlbumKind::from_api(raw.album.album_type.as_deref()),
            image_url: raw.album.images.into_iter().next().map(|i| i.url),
            album_name: raw.album.name,
            artist_names: raw.artists.into_iter().map(|a| a.name).collect(),
            popularity: raw.popularity.min(100) as u8,
            preview_url: raw.preview_url,
            external_url: raw.external_urls.spotify.unwrap_or_default(),
            title: raw.name,
            id: raw.id,
            uri,
        }
    }
}

/// Denormalised snapshot of an accepted track, as stored under `lovedSongs`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LovedTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub image: Option<String>,
    pub preview_url: Option<String>,
    pub external_url: String,
    #[serde(default)]
    pub uri: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl LovedTrack {
    pub fn snapshot(track: &Track, date_added: DateTime<Utc>) -> Self {
        Self {
            id: track.id.clone(),
            name: track.title.clone(),
            artist: track.artists_joined(),
            album: track.album_name.clone(),
            image: track.image_url.clone(),
            preview_url: track.preview_url.clone(),
            external_url: track.external_url.clone(),
            uri: Some(track.uri.clone()),
            date_added,
        }
    }
}

#[cfg(test)]
impl Track {
    pub fn mock(id: &str, title: &str, artist: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist_names: vec![artist.to_string()],
            album_name: "Mock Album".to_string(),
            album_kind: AlbumKind::Album,
            image_url: None,
            popularity: 50,
            preview_url: None,
            uri: format!("spotify:track:{}", id),
            external_url: format!("https://open.spotify.com/track/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_api_track_object() {
        let raw: TrackObject = serde_json::from_str(
            r#"{
                "id": "abc",
                "name": "Heat Waves",
                "artists": [{"name": "Glass Animals"}, {"name": "iann dior"}],
                "album": {"name": "Dreamland", "album_type": "SINGLE", "images": [{"url": "http://img/1"}, {"url": "http://img/2"}]},
                "popularity": 87,
                "preview_url": null,
                "external_urls": {"spotify": "https://open.spotify.com/track/abc"},
                "uri": "spotify:track:abc"
            }"#,
        )
        .unwrap();

        let track = Track::from(raw);
        assert_eq!(track.title, "Heat Waves");
        assert_eq!(track.artists_joined(), "Glass Animals, iann dior");
        assert_eq!(track.album_kind, AlbumKind::Single);
        assert_eq!(track.image_url.as_deref(), Some("http://img/1"));
        assert_eq!(track.popularity, 87);
        assert!(!track.has_preview());
    }

    #[test]
    fn missing_uri_is_derived_from_id() {
        let raw: TrackObject = serde_json::from_str(
            r#"{"id": "xyz", "name": "Stay", "album": {"name": "Stay"}}"#,
        )
        .unwrap();

        let track = Track::from(raw);
        assert_eq!(track.uri, "spotify:track:xyz");
        assert_eq!(track.album_kind, AlbumKind::Album);
        assert_eq!(track.external_url, "");
    }

    #[test]
    fn empty_preview_does_not_count_as_playable() {
        let mut track = Track::mock("1", "t", "a");
        track.preview_url = Some(String::new());
        assert!(!track.has_preview());
        track.preview_url = Some("https://p.scdn.co/mp3-preview/1".to_string());
        assert!(track.has_preview());
    }
}
