//! Bundled placeholder cards shown when live recommendations are unavailable

use crate::models::{AlbumKind, Track};
use once_cell::sync::Lazy;

const DEMO_PREFIX: &str = "demo_";
const DEMO_ARTWORK: &str =
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop";

pub static DEMO_TRACKS: Lazy<Vec<Track>> = Lazy::new(|| {
    vec![
        demo(1, "Blinding Lights", &["The Weeknd"], "After Hours", AlbumKind::Album, 95),
        demo(2, "Good 4 U", &["Olivia Rodrigo"], "SOUR", AlbumKind::Album, 89),
        demo(3, "As It Was", &["Harry Styles"], "Harry's House", AlbumKind::Album, 92),
        demo(4, "Heat Waves", &["Glass Animals"], "Dreamland", AlbumKind::Album, 87),
        demo(5, "Stay", &["The Kid LAROI", "Justin Bieber"], "Stay", AlbumKind::Single, 90),
    ]
});

fn demo(n: u32, title: &str, artists: &[&str], album: &str, kind: AlbumKind, popularity: u8) -> Track {
    let id = format!("{}{}", DEMO_PREFIX, n);
    Track {
        uri: format!("spotify:track:{}", id),
        id,
        title: title.to_string(),
        artist_names: artists.iter().map(|a| a.to_string()).collect(),
        album_name: album.to_string(),
        album_kind: kind,
        image_url: Some(DEMO_ARTWORK.to_string()),
        popularity,
        preview_url: None,
        external_url: String::new(),
    }
}

pub fn demo_tracks() -> Vec<Track> {
    DEMO_TRACKS.clone()
}

/// Placeholder cards never reach the remote playlist
pub fn is_demo_track(track: &Track) -> bool {
    track.id.starts_with(DEMO_PREFIX)
}
