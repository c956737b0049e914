use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskDeskError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Feature '{feature}' is unavailable for role '{role}'")]
    FeatureUnavailable { role: String, feature: String },

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Duplicate document id: {0}")]
    DuplicateDocument(String),

    #[error("Document {0} has no keywords")]
    EmptyKeywords(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Custom(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AskDeskError>;
