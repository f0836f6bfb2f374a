// Data models for Spotify API entities and local snapshots

pub mod decision;
pub mod playlist;
pub mod responses;
pub mod track;
pub mod user;

// Re-export commonly used types
pub use decision::{Decision, DecisionKind};
pub use playlist::RemotePlaylist;
pub use responses::{
    ArtistObject, PagingResponse, RecommendationsResponse, SnapshotResponse, TrackObject,
};
pub use track::{AlbumKind, LovedTrack, Track};
pub use user::UserProfile;
