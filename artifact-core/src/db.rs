use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::types::Json;
use sqlx::Connection;

use crate::config::DbConfig;
use crate::error::{ArtifactError, Result};
use crate::models::{NewArtifact, StoredArtifact};

const SELECT_ARTIFACT: &str = "SELECT artifact FROM artifacts WHERE knowledge_id = $1";

// created_at is bound as text and cast, so a TIMESTAMPTZ column accepts any
// format Postgres parses. A textual created_at column stores the cast's
// rendering (e.g. "2024-01-01 00:00:00+00"), not the document's string.
const INSERT_ARTIFACT: &str = r#"
    INSERT INTO artifacts (knowledge_id, artifact, created_at)
    VALUES ($1, $2, $3::timestamptz)
"#;

/// Open a single connection. Statements run outside any explicit transaction,
/// so each one commits on its own.
pub async fn connect(config: &DbConfig) -> Result<PgConnection> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password);

    let conn = PgConnection::connect_with(&options)
        .await
        .map_err(ArtifactError::Connect)?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Connected to artifact database"
    );
    Ok(conn)
}

/// Close the connection, logging rather than failing if the goodbye fails.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection cleanly: {}", e);
    }
}

pub async fn fetch_by_knowledge_id(
    conn: &mut PgConnection,
    knowledge_id: &str,
) -> Result<Vec<StoredArtifact>> {
    let rows = sqlx::query(SELECT_ARTIFACT)
        .bind(knowledge_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(ArtifactError::Query)?;

    tracing::debug!(knowledge_id, rows = rows.len(), "Fetched artifact rows");
    rows.iter().map(StoredArtifact::from_row).collect()
}

/// Insert one artifact row, returning the number of rows written.
pub async fn insert_artifact(conn: &mut PgConnection, artifact: &NewArtifact<'_>) -> Result<u64> {
    let result = sqlx::query(INSERT_ARTIFACT)
        .bind(artifact.knowledge_id.as_deref())
        .bind(Json(artifact.document))
        .bind(artifact.created_at.as_deref())
        .execute(&mut *conn)
        .await
        .map_err(ArtifactError::Insert)?;

    tracing::info!(
        knowledge_id = ?artifact.knowledge_id,
        rows = result.rows_affected(),
        "Inserted artifact"
    );
    Ok(result.rows_affected())
}
