use thiserror::Error;

/// Failure kinds of a single catalog request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Token rejected (HTTP 401). Never absorbed: clears credentials upstream.
    #[error("Unauthorized: access token is invalid or expired")]
    Unauthorized,

    #[error("API returned status: {status}")]
    Api { status: u16 },

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Network failure: {0}")]
    Network(String),

    /// Well-formed response without any usable items
    #[error("Empty result: {0}")]
    EmptyResult(String),
}

impl CatalogError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CatalogError::Unauthorized)
    }

    pub fn empty(what: impl Into<String>) -> Self {
        CatalogError::EmptyResult(what.into())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CatalogError::Decode(e.to_string())
        } else {
            CatalogError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
