use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationError;

pub type Result<T> = std::result::Result<T, ArtifactError>;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("Invalid {var} value '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Error reading JSON file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing JSON file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Error connecting to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Error querying artifact: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Error inserting artifact: {0}")]
    Insert(#[source] sqlx::Error),

    #[error("Stored artifact for knowledge_id '{knowledge_id}' is not valid JSON: {source}")]
    Decode {
        knowledge_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported artifact column type {0}")]
    UnsupportedColumn(String),

    #[error("No artifact found with knowledge_id '{0}'")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
