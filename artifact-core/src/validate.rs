//! Structural checks run on an artifact document before it is inserted.
//!
//! Only presence of the required fields and the shape of `epistemic_trace`
//! are checked. Field values are otherwise passed through untouched.

use serde_json::Value;
use thiserror::Error;

/// Top-level fields, checked in this order.
pub const REQUIRED_FIELDS: [&str; 4] = ["id", "created_at", "content", "epistemic_trace"];

/// Fields required inside `epistemic_trace`, checked in this order.
pub const TRACE_FIELDS: [&str; 3] = ["justification", "diagnostic_flags", "detected_by"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Artifact must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: '{0}'")]
    MissingField(&'static str),

    #[error("Field 'epistemic_trace' must be an object")]
    TraceNotObject,

    #[error("Missing required epistemic_trace field: '{0}'")]
    MissingTraceField(&'static str),

    #[error("Field 'diagnostic_flags' in 'epistemic_trace' must be a list")]
    FlagsNotList,
}

/// Check an artifact document, failing on the first problem found.
pub fn validate_artifact(artifact: &Value) -> Result<(), ValidationError> {
    let fields = artifact.as_object().ok_or(ValidationError::NotAnObject)?;

    if let Some(missing) = REQUIRED_FIELDS.into_iter().find(|f| !fields.contains_key(*f)) {
        return Err(ValidationError::MissingField(missing));
    }

    let trace = fields["epistemic_trace"]
        .as_object()
        .ok_or(ValidationError::TraceNotObject)?;

    if let Some(missing) = TRACE_FIELDS.into_iter().find(|f| !trace.contains_key(*f)) {
        return Err(ValidationError::MissingTraceField(missing));
    }

    if !trace["diagnostic_flags"].is_array() {
        return Err(ValidationError::FlagsNotList);
    }

    Ok(())
}
