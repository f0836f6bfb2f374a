// Playlist endpoints
use super::client::SpotifyClient;
use super::errors::CatalogResult;
use crate::models::{RemotePlaylist, SnapshotResponse};
use serde_json::json;

/// The API accepts at most this many URIs per append request
const MAX_URIS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Create a private playlist owned by `owner_id`
    pub async fn create_private_playlist(
        &self,
        token: &str,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<RemotePlaylist> {
        let path = format!("/users/{}/playlists", urlencoding::encode(owner_id));
        log::debug!("[Playlists] Creating playlist '{}' for {}", name, owner_id);

        let request = self.post(&path, token).json(&json!({
            "name": name,
            "description": description,
            "public": false,
        }));
        let playlist: RemotePlaylist = self.send_json(request, "Create playlist").await?;

        log::info!("[Playlists] Created playlist {} ({})", playlist.name, playlist.id);
        Ok(playlist)
    }

    /// Append tracks in request-sized chunks; returns the last snapshot id
    pub async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        track_uris: &[String],
    ) -> CatalogResult<String> {
        let path = format!("/playlists/{}/tracks", urlencoding::encode(playlist_id));
        let mut snapshot_id = String::new();

        for chunk in track_uris.chunks(MAX_URIS_PER_REQUEST) {
            let request = self.post(&path, token).json(&json!({ "uris": chunk }));
            let snapshot: SnapshotResponse = self.send_json(request, "Append tracks").await?;
            log::debug!(
                "[Playlists] Appended {} track(s) to {} (snapshot {})",
                chunk.len(),
                playlist_id,
                snapshot.snapshot_id
            );
            snapshot_id = snapshot.snapshot_id;
        }

        Ok(snapshot_id)
    }
}
