use crate::models::UserProfile;
use crate::utils::token_store::{AccessToken, TokenStore};

/// Credentials and the signed-in profile for the current session
pub struct AuthState {
    pub token_store: TokenStore,
    pub profile: Option<UserProfile>,
    /// Set after an `Unauthorized` response; the UI should show the login prompt
    pub needs_reauth: bool,
}

impl AuthState {
    pub fn new(token_store: TokenStore) -> Self {
        Self {
            token_store,
            profile: None,
            needs_reauth: false,
        }
    }

    /// Current access token if still within its TTL
    pub fn get_token(&mut self) -> Option<AccessToken> {
        self.token_store.load()
    }

    pub fn is_authenticated(&mut self) -> bool {
        self.get_token().is_some()
    }

    pub fn sign_in(&mut self, value: &str, issued_at_ms: i64) -> AccessToken {
        self.needs_reauth = false;
        self.token_store.save(value, issued_at_ms)
    }

    /// Token rejected by the API: forget it and ask for a new login
    pub fn invalidate(&mut self) {
        log::warn!("[Auth] Access token rejected, clearing credentials");
        self.token_store.clear();
        self.needs_reauth = true;
    }

    /// Clear user session (logout)
    pub fn clear_session(&mut self) {
        self.token_store.clear();
        self.profile = None;
        self.needs_reauth = false;
    }

    /// Market for recommendations, from the profile country when known
    pub fn market(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.country.as_deref())
    }
}
