use thiserror::Error;

/// Local key-value persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error for '{key}': {message}")]
    Serialization { key: String, message: String },

    #[error("Store rejected write for '{0}'")]
    Rejected(String),

    #[error("No data directory available on this platform")]
    NoDataDir,
}

/// OAuth redirect and token exchange failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization denied: {0}")]
    Denied(String),

    #[error("Callback state did not match the login request")]
    StateMismatch,

    #[error("Callback did not carry an authorization code")]
    MissingCode,

    #[error("Callback listener failed: {0}")]
    Callback(String),

    #[error("Timed out waiting for the login callback")]
    Timeout,

    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("Missing configuration: {0}")]
    Config(String),
}

/// Startup configuration problems
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set (in the environment or a .env file)")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
