//! Authorization-code login against the Spotify accounts service
//!
//! Flow: open the authorize URL in the browser, capture `code` on a local
//! `tiny_http` listener bound to the redirect URI, exchange it for an access
//! token using the client credentials.

use super::errors::AuthError;
use crate::constants::{AUTHORIZE_URL, OAUTH_SCOPES, TOKEN_URL};
use base64::Engine;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
}

impl OAuthConfig {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Random `state` value tying a callback to the login that started it
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

pub fn authorize_url(config: &OAuthConfig, state: &str) -> String {
    format!(
        "{}?client_id={}&response_type=code&redirect_uri={}&scope={}&state={}&show_dialog=true",
        config.authorize_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&OAUTH_SCOPES.join(" ")),
        urlencoding::encode(state),
    )
}

/// Extract the authorization code from a callback request target such as
/// `/callback?code=...&state=...`
pub fn parse_callback(target: &str, expected_state: &str) -> Result<String, AuthError> {
    let query = target.split_once('?').map(|(_, q)| q).unwrap_or("");
    let mut code = None;
    let mut state = None;
    let mut error = None;

    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            _ => {}
        }
    }

    if let Some(reason) = error {
        return Err(AuthError::Denied(reason));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)
}

/// Host and port the redirect URI points at, e.g. `127.0.0.1:3000`
fn listen_address(redirect_uri: &str) -> Result<String, AuthError> {
    let without_scheme = redirect_uri
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(redirect_uri);
    let authority = without_scheme.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return Err(AuthError::Config(format!("bad redirect URI: {}", redirect_uri)));
    }
    Ok(if authority.contains(':') {
        authority.to_string()
    } else {
        format!("{}:80", authority)
    })
}

/// Block until the provider redirects back to us (run via `spawn_blocking`)
pub fn wait_for_callback(
    redirect_uri: &str,
    expected_state: &str,
    timeout: Duration,
) -> Result<String, AuthError> {
    let address = listen_address(redirect_uri)?;
    let server = tiny_http::Server::http(&address)
        .map_err(|e| AuthError::Callback(format!("cannot listen on {}: {}", address, e)))?;
    log::info!("[OAuth] Waiting for login callback on {}", address);

    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(AuthError::Timeout);
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(r)) => r,
            Ok(None) => return Err(AuthError::Timeout),
            Err(e) => return Err(AuthError::Callback(e.to_string())),
        };

        // Browsers also ask for favicons and the like
        if request.url().starts_with("/favicon") {
            let _ = request.respond(tiny_http::Response::empty(404));
            continue;
        }

        let result = parse_callback(request.url(), expected_state);
        let page = match &result {
            Ok(_) => "Login complete. You can close this tab and return to SwipeRS.",
            Err(_) => "Login failed. Return to SwipeRS and try again.",
        };
        let _ = request.respond(tiny_http::Response::from_string(page));
        return result;
    }
}

/// Trade an authorization code for an access token
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &OAuthConfig,
    code: &str,
) -> Result<TokenResponse, AuthError> {
    let credentials = base64::engine::general_purpose::STANDARD
        .encode(format!("{}:{}", config.client_id, config.client_secret));
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    let response = http
        .post(&config.token_url)
        .header("Authorization", format!("Basic {}", credentials))
        .form(&params)
        .send()
        .await
        .map_err(|e| AuthError::Exchange(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("[OAuth] Token exchange returned {}: {}", status, body);
        return Err(AuthError::Exchange(format!("status {}", status)));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthError::Exchange(e.to_string()))?;
    log::info!(
        "[OAuth] Token issued (type {}, expires in {}s)",
        token.token_type.as_deref().unwrap_or("?"),
        token.expires_in.unwrap_or_default()
    );
    Ok(token)
}

/// Full interactive login: browser, callback, exchange
pub async fn login(http: &reqwest::Client, config: &OAuthConfig, timeout: Duration) -> Result<TokenResponse, AuthError> {
    let state = generate_state();
    let url = authorize_url(config, &state);

    log::info!("[OAuth] Opening browser for login");
    if let Err(e) = webbrowser::open(&url) {
        log::warn!("[OAuth] Could not open browser ({}), visit manually: {}", e, url);
    }

    let redirect_uri = config.redirect_uri.clone();
    let code = tokio::task::spawn_blocking(move || wait_for_callback(&redirect_uri, &state, timeout))
        .await
        .map_err(|e| AuthError::Callback(e.to_string()))??;

    exchange_code(http, config, &code).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_server::serve;

    fn config() -> OAuthConfig {
        OAuthConfig::new(
            "client".into(),
            "secret".into(),
            "http://127.0.0.1:3000/callback".into(),
        )
    }

    #[test]
    fn authorize_url_carries_code_flow_parameters() {
        let url = authorize_url(&config(), "xyz");
        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("client_id=client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A3000%2Fcallback"));
        assert!(url.contains("scope=user-read-private%20user-read-email%20user-top-read"));
        assert!(url.contains("state=xyz"));
    }

    #[test]
    fn parses_code_from_callback() {
        let code = parse_callback("/callback?code=AQB%2Fx&state=s1", "s1").unwrap();
        assert_eq!(code, "AQB/x");
    }

    #[test]
    fn rejects_wrong_state_and_denials() {
        assert!(matches!(
            parse_callback("/callback?code=c&state=other", "s1"),
            Err(AuthError::StateMismatch)
        ));
        assert!(matches!(
            parse_callback("/callback?error=access_denied&state=s1", "s1"),
            Err(AuthError::Denied(reason)) if reason == "access_denied"
        ));
        assert!(matches!(
            parse_callback("/callback?state=s1", "s1"),
            Err(AuthError::MissingCode)
        ));
    }

    #[test]
    fn listen_address_defaults_port() {
        assert_eq!(listen_address("http://127.0.0.1:3000/callback").unwrap(), "127.0.0.1:3000");
        assert_eq!(listen_address("http://localhost/cb").unwrap(), "localhost:80");
    }

    #[test]
    fn states_are_random() {
        let a = generate_state();
        assert_eq!(a.len(), 16);
        assert_ne!(a, generate_state());
    }

    #[tokio::test]
    async fn exchange_posts_basic_credentials() {
        let (base, seen) = serve(vec![(
            200,
            r#"{"access_token":"BQD","token_type":"Bearer","expires_in":3600}"#,
        )]);
        let mut cfg = config();
        cfg.token_url = format!("{}/api/token", base);

        let token = exchange_code(&reqwest::Client::new(), &cfg, "the-code").await.unwrap();
        assert_eq!(token.access_token, "BQD");
        assert_eq!(token.expires_in, Some(3600));

        let request = seen.recv().unwrap();
        assert_eq!(request.url, "/api/token");
        // base64("client:secret")
        assert_eq!(request.authorization.as_deref(), Some("Basic Y2xpZW50OnNlY3JldA=="));
        assert!(request.body.contains("grant_type=authorization_code"));
        assert!(request.body.contains("code=the-code"));
    }

    #[tokio::test]
    async fn exchange_failure_is_reported() {
        let (base, _seen) = serve(vec![(400, r#"{"error":"invalid_grant"}"#)]);
        let mut cfg = config();
        cfg.token_url = format!("{}/api/token", base);

        let err = exchange_code(&reqwest::Client::new(), &cfg, "bad").await.unwrap_err();
        assert!(matches!(err, AuthError::Exchange(_)));
    }
}
