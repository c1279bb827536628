//! Retrieval pipeline: config, connect, select by `knowledge_id`, render.

use std::io::Write;

use artifact_core::{db, ArtifactError, DbConfig, Result};
use serde_json::Value;

/// Fetch every artifact stored under `knowledge_id` as JSON documents.
///
/// The connection is closed before returning, whether the query succeeded
/// or not. An empty result is not an error here; see [`render_artifacts`].
pub async fn fetch_artifacts(config: &DbConfig, knowledge_id: &str) -> Result<Vec<Value>> {
    let mut conn = db::connect(config).await?;
    let fetched = db::fetch_by_knowledge_id(&mut conn, knowledge_id).await;
    db::close(conn).await;

    fetched?
        .into_iter()
        .map(|stored| {
            stored.into_document().map_err(|source| ArtifactError::Decode {
                knowledge_id: knowledge_id.to_string(),
                source,
            })
        })
        .collect()
}

/// Write each document as indented JSON to `out`.
///
/// More than one match is reported on `diag` but still printed; no match at
/// all is [`ArtifactError::NotFound`].
pub fn render_artifacts<W: Write, E: Write>(
    knowledge_id: &str,
    artifacts: &[Value],
    out: &mut W,
    diag: &mut E,
) -> Result<()> {
    if artifacts.is_empty() {
        return Err(ArtifactError::NotFound(knowledge_id.to_string()));
    }

    if artifacts.len() > 1 {
        writeln!(
            diag,
            "Warning: multiple ({}) artifacts found for knowledge_id '{}'",
            artifacts.len(),
            knowledge_id
        )?;
    }

    for artifact in artifacts {
        serde_json::to_writer_pretty(&mut *out, artifact).map_err(std::io::Error::from)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Full `get-artifact` run against the process environment.
pub async fn run<W: Write, E: Write>(knowledge_id: &str, out: &mut W, diag: &mut E) -> Result<()> {
    let config = DbConfig::from_env()?;
    let artifacts = fetch_artifacts(&config, knowledge_id).await?;
    render_artifacts(knowledge_id, &artifacts, out, diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(id: &str) -> Value {
        json!({
            "id": id,
            "created_at": "2024-01-01T00:00:00Z",
            "content": {},
            "epistemic_trace": {
                "justification": "x",
                "diagnostic_flags": [],
                "detected_by": "unit-test"
            }
        })
    }

    #[test]
    fn test_render_single_artifact() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        render_artifacts("a1", &[artifact("a1")], &mut out, &mut diag).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("{\n  \""), "expected two-space indent: {printed}");
        assert!(printed.ends_with("}\n"));
        let parsed: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(parsed, artifact("a1"));
        assert!(diag.is_empty());
    }

    #[test]
    fn test_render_warns_on_duplicates() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let rows = [artifact("dup1"), artifact("dup1")];
        render_artifacts("dup1", &rows, &mut out, &mut diag).unwrap();

        let warning = String::from_utf8(diag).unwrap();
        assert_eq!(
            warning,
            "Warning: multiple (2) artifacts found for knowledge_id 'dup1'\n"
        );

        let printed = String::from_utf8(out).unwrap();
        let docs: Vec<Value> = serde_json::Deserializer::from_str(&printed)
            .into_iter::<Value>()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert!(printed.matches("\"dup1\"").count() == 2);
    }

    #[test]
    fn test_render_empty_is_not_found() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let err = render_artifacts("nope", &[], &mut out, &mut diag).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(ref id) if id == "nope"));
        assert_eq!(err.to_string(), "No artifact found with knowledge_id 'nope'");
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_null_artifact() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        render_artifacts("a1", &[Value::Null], &mut out, &mut diag).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "null\n");
    }
}
