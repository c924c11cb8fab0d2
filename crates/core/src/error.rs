/// Errors raised while building or rebuilding a recognition failure.
///
/// These describe a malformed failure value, never the recognition problem
/// itself; that is what [`crate::RecognitionFailure`] carries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureError {
    /// A required input was absent (no input stream on construction, no
    /// field carrier on reconstruction).
    #[error("invalid argument: '{parameter}' is required")]
    InvalidArgument { parameter: String },

    /// The field set lacks a field this failure kind requires.
    #[error("field set missing required field: '{field}'")]
    MissingField { field: String },

    /// A field is present but has the wrong shape.
    #[error("invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// The field set was written by an unknown codec version.
    #[error("unsupported field format version {found}")]
    UnsupportedVersion { found: u64 },

    #[error("unknown failure kind: '{kind}'")]
    UnknownKind { kind: String },

    /// The field set could not be parsed as JSON.
    #[error("malformed field set: {0}")]
    Json(String),
}

impl FailureError {
    pub(crate) fn invalid_argument(parameter: &str) -> Self {
        FailureError::InvalidArgument {
            parameter: parameter.to_string(),
        }
    }

    pub(crate) fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        FailureError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
