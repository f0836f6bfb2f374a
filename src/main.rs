//! Terminal front end: shows the head card and maps keys to swipe commands.
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use swipers::api::{CatalogApi, SpotifyClient};
use swipers::app::{DiscoverySession, RefreshOutcome};
use swipers::config::AppConfig;
use swipers::constants::{
    CARD_ARTIST_MAX_CHARS, CARD_TITLE_MAX_CHARS, OAUTH_CALLBACK_TIMEOUT_SECS, RECENT_LOVED_SHOWN,
};
use swipers::state::{NoticeLevel, SwipeDirection};
use swipers::utils::error_handling::create_runtime;
use swipers::utils::formatting::{capitalize_first, truncate_text};
use swipers::utils::kv_store::{SharedStore, SqliteStore};
use swipers::utils::oauth::{self, OAuthConfig};
use swipers::utils::token_store::now_millis;
use swipers::utils::AuthError;
use swipers::{APP_NAME, APP_VERSION};
use tokio::io::{AsyncBufReadExt, BufReader};

const APP_DESCRIPTION: &str = "Swipe to discover music";

fn main() {
    // Initialize logger with default settings
    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("rusqlite", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{} - {}", APP_NAME, APP_VERSION, APP_DESCRIPTION);

    let rt = match create_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("[Main] {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run()) {
        log::error!("[Main] {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let db_path = SqliteStore::default_path(config.data_dir.as_deref())?;
    let store: SharedStore = Arc::new(SqliteStore::open(&db_path)?);
    let catalog: Arc<dyn CatalogApi> = Arc::new(SpotifyClient::new());
    let http = reqwest::Client::new();

    let mut session = DiscoverySession::new(catalog, store, config.session.clone());
    let mut signed_in = session.restore().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if signed_in {
            render(&mut session);
        } else {
            flush_notices(&mut session);
            println!();
            println!("  Not logged in.  [enter] log in with Spotify   [q] quit");
            print_prompt();
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = line.trim();
        if command == "q" {
            break;
        }
        if !signed_in {
            signed_in = login(&mut session, &http, &config.oauth).await;
            continue;
        }

        match command {
            "d" => decide(&mut session, SwipeDirection::Accept).await,
            "a" => decide(&mut session, SwipeDirection::Reject).await,
            "r" => {
                if session.refresh_recommendations().await == RefreshOutcome::Unauthenticated {
                    signed_in = false;
                }
            }
            "s" => print_loved(&session),
            "l" => {
                session.logout();
                signed_in = false;
            }
            "" => {}
            other => println!("Unknown command '{}'", other),
        }

        if session.auth.needs_reauth {
            signed_in = false;
        }
    }

    log::info!("[Main] Bye");
    Ok(())
}

/// Run the browser login; a failure is reported and leaves the prompt up
async fn login(session: &mut DiscoverySession, http: &reqwest::Client, oauth_config: &OAuthConfig) -> bool {
    match try_login(session, http, oauth_config).await {
        Ok(()) => {
            // Tracks loved before the session expired
            session.flush_playlist_sync().await;
            true
        }
        Err(e) => {
            log::warn!("[Main] Login failed: {}", e);
            println!("Login failed: {}", e);
            false
        }
    }
}

async fn try_login(
    session: &mut DiscoverySession,
    http: &reqwest::Client,
    oauth_config: &OAuthConfig,
) -> Result<(), AuthError> {
    println!("Log in with Spotify in the browser window that just opened...");

    let timeout = Duration::from_secs(OAUTH_CALLBACK_TIMEOUT_SECS);
    let token = oauth::login(http, oauth_config, timeout).await?;

    if !session.sign_in(&token.access_token, now_millis()).await {
        return Err(AuthError::Exchange("new token was rejected".to_string()));
    }
    Ok(())
}

async fn decide(session: &mut DiscoverySession, direction: SwipeDirection) {
    let Some(decision) = session.command(direction, Instant::now()) else {
        return;
    };
    if decision.is_accept() {
        session.flush_playlist_sync().await;
    }
}

fn render(session: &mut DiscoverySession) {
    flush_notices(session);

    let stats = session.stats();
    let who = match session.profile() {
        Some(profile) => match profile.avatar_url() {
            Some(avatar) => format!("{} ({})", profile.label(), avatar),
            None => profile.label().to_string(),
        },
        None => String::new(),
    };
    println!();
    println!(
        "{}  |  loved {}  passed {}  discovered {}{}",
        who,
        stats.accepted,
        stats.rejected,
        stats.discovered,
        if session.is_degraded() { "  |  demo mode" } else { "" }
    );

    match session.current_card() {
        Some(track) => {
            println!("  {}", truncate_text(&track.title, CARD_TITLE_MAX_CHARS));
            println!("  {}", truncate_text(&track.artists_joined(), CARD_ARTIST_MAX_CHARS));
            println!(
                "  {} · {}  ·  {}% popular",
                track.album_name,
                capitalize_first(track.album_kind.as_str()),
                track.popularity
            );
            println!("  [a] pass   [d] love   [s] loved songs   [r] refresh   [l] logout   [q] quit");
        }
        None => {
            let summary = session.summary();
            println!("  Amazing taste in music!");
            println!(
                "  You've discovered {} songs and loved {} of them.",
                summary.discovered, summary.loved
            );
            println!("  [r] discover more   [s] loved songs   [q] quit");
        }
    }
    print_prompt();
}

fn print_prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_loved(session: &DiscoverySession) {
    let recent = session.ledger.recent(RECENT_LOVED_SHOWN);
    if recent.is_empty() {
        println!("Start swiping to see your loved songs!");
        return;
    }
    for song in recent {
        println!("  ♥ {} - {}", truncate_text(&song.name, 20), truncate_text(&song.artist, 25));
    }
}

fn flush_notices(session: &mut DiscoverySession) {
    for notice in session.notices.drain() {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        };
        println!("[{}] {}", tag, notice.message);
    }
}
