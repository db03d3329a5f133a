use thiserror::Error;

#[derive(Error, Debug)]
pub enum FcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Page does not exist: {0}")]
    PageNotFound(String),

    #[error("Marker {marker:?} not found")]
    MarkerNotFound { marker: String },

    #[error("No nomination page found for {0}")]
    NoNomination(String),

    #[error("Ambiguous data in {page}: {detail}")]
    AmbiguousData { page: String, detail: String },

    #[error("{page} is missing {marker:?}; fill this in manually")]
    StructuralGap { page: String, marker: String },

    #[error("Could not resolve file usage for {0}; was this file renamed after its nomination?")]
    RenameConflict(String),

    #[error("Invalid input: {0}")]
    InputValidation(String),
}

impl FcError {
    /// Absent pages, markers and nominations. Recoverable per candidate.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FcError::PageNotFound(_) | FcError::MarkerNotFound { .. } | FcError::NoNomination(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FcError>;
