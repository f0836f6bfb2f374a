//! Application constants and configuration values

use std::time::Duration;

// === Spotify Endpoints ===
pub const API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

// === OAuth ===
pub const OAUTH_REDIRECT_URI: &str = "http://127.0.0.1:3000/callback";
pub const OAUTH_SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "user-top-read",
    "playlist-modify-private",
    "playlist-modify-public",
];
pub const OAUTH_CALLBACK_TIMEOUT_SECS: u64 = 300;
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60); // Provider tokens live one hour

// === Persisted Keys ===
pub const KEY_ACCESS_TOKEN: &str = "accessToken";
pub const KEY_TOKEN_TIMESTAMP: &str = "tokenTimestamp";
pub const KEY_LOVED_SONGS: &str = "lovedSongs";
pub const KEY_LOVED_COUNT: &str = "lovedCount";
pub const KEY_PASSED_COUNT: &str = "passedCount";
pub const KEY_DISCOVERED_COUNT: &str = "discoveredCount";
pub const KEY_PLAYLIST_ID: &str = "playlistId";

// === Recommendations ===
pub const SEED_LOOKUP_LIMIT: u32 = 5;
pub const MAX_SEEDS: usize = 5;
pub const RECOMMENDATIONS_LIMIT: u32 = 50;
pub const MIN_POPULARITY: u8 = 20;
pub const DEFAULT_MARKET: &str = "US";

/// Curated popular artists used when the listener has no usable history.
pub const FALLBACK_ARTIST_IDS: &[&str] = &[
    "4NHQUGzhtTLFvgF5SZesLK", // Tame Impala
    "1Xyo4u8uXC1ZmMpatF05PJ", // The Weeknd
    "06HL4z0CvFAxyc27GXpf02", // Taylor Swift
    "1McMsnEElThX1knmY4oliG", // Olivia Rodrigo
    "4q3ewBCX7sLwd24euuV69X", // Bad Bunny
];

/// Mixed into track seeds to keep results from getting too narrow.
pub const DIVERSITY_ARTIST_ID: &str = "1Xyo4u8uXC1ZmMpatF05PJ";

// === Ledger ===
pub const LEDGER_CAPACITY: usize = 50;
pub const RECENT_LOVED_SHOWN: usize = 5;

// === Swipe Gesture ===
pub const SWIPE_DEAD_ZONE_PX: f32 = 50.0;
pub const SWIPE_COMMIT_THRESHOLD_PX: f32 = 100.0;
pub const SWIPE_SETTLE_DELAY_MILLIS: u64 = 300; // Matches the card exit animation
pub const SWIPE_ROTATION_PER_PX: f32 = 0.1;
pub const SWIPE_SCALE_PER_PX: f32 = 0.0005;

// === Playlist Sync ===
pub const SYNC_PLAYLIST_NAME: &str = "SwipeRS Discoveries";
pub const SYNC_PLAYLIST_DESCRIPTION: &str = "Songs I loved while swiping on SwipeRS";

// === Card Text ===
pub const CARD_TITLE_MAX_CHARS: usize = 40;
pub const CARD_ARTIST_MAX_CHARS: usize = 50;
