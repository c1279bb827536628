pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod validate;

pub use config::DbConfig;
pub use error::{ArtifactError, Result};
pub use models::{NewArtifact, StoredArtifact};
pub use validate::{validate_artifact, ValidationError};
