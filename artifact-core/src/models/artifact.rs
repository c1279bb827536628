use serde_json::Value;
use sqlx::postgres::{PgRow, PgValueRef};
use sqlx::types::Json;
use sqlx::{Decode, Postgres, Row, Type, TypeInfo, ValueRef};

use crate::error::{ArtifactError, Result};
use crate::validate::{validate_artifact, ValidationError};

/// The `artifact` column as it came back from the database.
///
/// The column may be declared JSON/JSONB or as a text type holding serialized
/// JSON. The variant is chosen from the column's reported type, not by trial
/// decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredArtifact {
    /// JSON or JSONB column; SQL NULL is kept as `Value::Null`.
    Structured(Value),
    /// Text column that still needs to be parsed.
    Text(String),
}

impl StoredArtifact {
    /// Decode the first column of a result row.
    pub fn from_row(row: &PgRow) -> Result<Self> {
        let raw = row.try_get_raw(0).map_err(ArtifactError::Query)?;
        Self::from_value(raw)
    }

    fn from_value(raw: PgValueRef<'_>) -> Result<Self> {
        if raw.is_null() {
            return Ok(Self::Structured(Value::Null));
        }

        let ty = raw.type_info().into_owned();
        if <Json<Value> as Type<Postgres>>::compatible(&ty) {
            let Json(value) = <Json<Value> as Decode<Postgres>>::decode(raw)
                .map_err(|e| ArtifactError::Query(sqlx::Error::Decode(e)))?;
            Ok(Self::Structured(value))
        } else if <String as Type<Postgres>>::compatible(&ty) {
            let text = <String as Decode<Postgres>>::decode(raw)
                .map_err(|e| ArtifactError::Query(sqlx::Error::Decode(e)))?;
            Ok(Self::Text(text))
        } else {
            Err(ArtifactError::UnsupportedColumn(ty.name().to_string()))
        }
    }

    /// Produce the JSON document, parsing it first when stored as text.
    pub fn into_document(self) -> serde_json::Result<Value> {
        match self {
            Self::Structured(value) => Ok(value),
            Self::Text(text) => serde_json::from_str(&text),
        }
    }
}

/// A validated artifact ready to be inserted as one row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtifact<'a> {
    /// Bound to `knowledge_id`.
    pub knowledge_id: Option<String>,
    /// Bound to `created_at`.
    pub created_at: Option<String>,
    /// The whole document, bound to `artifact`.
    pub document: &'a Value,
}

impl<'a> NewArtifact<'a> {
    pub fn from_document(document: &'a Value) -> std::result::Result<Self, ValidationError> {
        validate_artifact(document)?;
        Ok(Self {
            knowledge_id: sql_text(&document["id"]),
            created_at: sql_text(&document["created_at"]),
            document,
        })
    }

    /// Identifier as shown to the user.
    pub fn display_id(&self) -> String {
        match &self.document["id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// Strings bind as-is, JSON null binds as SQL NULL, anything else as its JSON text.
fn sql_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
