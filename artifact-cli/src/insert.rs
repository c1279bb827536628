//! Insert pipeline: read file, validate, config, connect, insert.

use std::fs;
use std::io::Write;
use std::path::Path;

use artifact_core::{db, ArtifactError, DbConfig, NewArtifact, Result};
use serde_json::Value;

/// Read and parse an artifact JSON file.
pub fn load_artifact(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| ArtifactError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ArtifactError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Insert one validated artifact over a fresh connection, closing it on both
/// the success and the failure path.
pub async fn insert_document(config: &DbConfig, artifact: &NewArtifact<'_>) -> Result<u64> {
    let mut conn = db::connect(config).await?;
    let inserted = db::insert_artifact(&mut conn, artifact).await;
    db::close(conn).await;
    inserted
}

/// Full `insert-artifact` run. Configuration is only read once the document
/// has passed validation.
pub async fn run<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let document = load_artifact(path)?;
    let artifact = NewArtifact::from_document(&document)?;
    tracing::debug!(path = %path.display(), "Artifact file validated");

    let config = DbConfig::from_env()?;
    insert_document(&config, &artifact).await?;

    writeln!(out, "Artifact '{}' inserted successfully.", artifact.display_id())?;
    Ok(())
}
