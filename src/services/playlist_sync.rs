/// Playlist sync service: mirrors loved tracks into a remote playlist
///
/// The ledger has already recorded the accept by the time this runs; a sync
/// failure is reported to the caller and never rolls that back.
use crate::api::{CatalogApi, CatalogError};
use crate::constants::{SYNC_PLAYLIST_DESCRIPTION, SYNC_PLAYLIST_NAME};
use crate::models::UserProfile;
use crate::state::DecisionLedger;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Synced { playlist_id: String, created: bool },
    Skipped(&'static str),
    Failed(CatalogError),
}

impl SyncOutcome {
    /// Toast text for the outcome, if it deserves one
    pub fn message(&self) -> Option<String> {
        match self {
            SyncOutcome::Synced { created: true, .. } => {
                Some(format!("Created playlist \"{}\"", SYNC_PLAYLIST_NAME))
            }
            SyncOutcome::Synced { .. } | SyncOutcome::Skipped(_) => None,
            SyncOutcome::Failed(e) => Some(format!("Couldn't add to playlist: {}", e)),
        }
    }
}

/// Append `track_uri` to the ledger's playlist, creating the playlist first if
/// there is none yet or the stored one no longer exists
pub async fn sync_loved_track(
    catalog: &dyn CatalogApi,
    token: &str,
    owner: Option<&UserProfile>,
    ledger: &mut DecisionLedger,
    track_uri: &str,
) -> SyncOutcome {
    let Some(owner) = owner else {
        log::debug!("[PlaylistSync] No profile loaded, skipping sync");
        return SyncOutcome::Skipped("no profile");
    };
    let uris = [track_uri.to_string()];

    let mut created = false;
    let playlist_id = match ledger.playlist_id() {
        Some(id) => id.to_string(),
        None => match create_playlist(catalog, token, owner, ledger).await {
            Ok(id) => {
                created = true;
                id
            }
            Err(e) => return SyncOutcome::Failed(e),
        },
    };

    match catalog.append_to_playlist(token, &playlist_id, &uris).await {
        Ok(_) => {
            log::info!("[PlaylistSync] Added {} to {}", track_uri, playlist_id);
            SyncOutcome::Synced { playlist_id, created }
        }
        // Playlist deleted on the remote side: start a fresh one once
        Err(CatalogError::Api { status: 404 }) if !created => {
            log::warn!("[PlaylistSync] Playlist {} is gone, recreating", playlist_id);
            let new_id = match create_playlist(catalog, token, owner, ledger).await {
                Ok(id) => id,
                Err(e) => return SyncOutcome::Failed(e),
            };
            match catalog.append_to_playlist(token, &new_id, &uris).await {
                Ok(_) => SyncOutcome::Synced {
                    playlist_id: new_id,
                    created: true,
                },
                Err(e) => SyncOutcome::Failed(e),
            }
        }
        Err(e) => {
            log::error!("[PlaylistSync] Failed to add {}: {}", track_uri, e);
            SyncOutcome::Failed(e)
        }
    }
}

async fn create_playlist(
    catalog: &dyn CatalogApi,
    token: &str,
    owner: &UserProfile,
    ledger: &mut DecisionLedger,
) -> Result<String, CatalogError> {
    let playlist = catalog
        .create_playlist(token, &owner.id, SYNC_PLAYLIST_NAME, SYNC_PLAYLIST_DESCRIPTION)
        .await
        .map_err(|e| {
            log::error!("[PlaylistSync] Failed to create playlist: {}", e);
            e
        })?;
    ledger.set_playlist_id(&playlist.id);
    Ok(playlist.id)
}
