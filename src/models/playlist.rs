use serde::{Deserialize, Serialize};

/// Playlist created on the remote account for mirroring loved tracks
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemotePlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}
