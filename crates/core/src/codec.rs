//! Explicit field-set encoding for recognition failures.
//!
//! A failure crosses a process boundary as one flat JSON object. The
//! object always carries `format_version` and `kind`, the shared context
//! fields, and the fields of its variant:
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "kind": "NoViableAlternative",
//!   "stream_kind": "character",
//!   "index": 4, "line": 1, "char_position_in_line": 4,
//!   "approximate_line_info": false,
//!   "source_name": null,
//!   "character": 65, "token": null,
//!   "decision_description": "rule X alt 2",
//!   "decision_number": 3, "state_number": 17
//! }
//! ```
//!
//! Decoding restores stored values verbatim; it never consults a stream.

use serde_json::{json, Map, Value};

use crate::error::FailureError;
use crate::failure::{
    EarlyExit, FailedPredicate, MismatchedRange, MismatchedSet, MismatchedToken, MissingToken,
    NoViableAlternative, RecognitionFailure, UnwantedToken,
};
use crate::snapshot::FailureContext;
use crate::stream::{StreamKind, Token};

/// Version written into every encoded field set.
pub const FIELD_FORMAT_VERSION: u64 = 1;

/// Tear a failure down into its flat field set.
pub fn encode(failure: &RecognitionFailure) -> Value {
    let mut fields = Map::new();
    fields.insert("format_version".into(), json!(FIELD_FORMAT_VERSION));
    fields.insert("kind".into(), json!(failure.kind_name()));
    encode_context(failure.context(), &mut fields);

    match failure {
        RecognitionFailure::NoViableAlternative(e) => {
            fields.insert(
                "decision_description".into(),
                json!(e.decision_description()),
            );
            fields.insert("decision_number".into(), json!(e.decision_number()));
            fields.insert("state_number".into(), json!(e.state_number()));
        }
        RecognitionFailure::MismatchedToken(e) => {
            fields.insert("expecting".into(), json!(e.expecting));
        }
        RecognitionFailure::MissingToken(e) => {
            fields.insert("expecting".into(), json!(e.expecting));
            fields.insert("inserted".into(), json!(e.inserted));
        }
        RecognitionFailure::UnwantedToken(e) => {
            fields.insert("expecting".into(), json!(e.expecting));
        }
        RecognitionFailure::MismatchedSet(e) => {
            fields.insert("expecting".into(), json!(e.expecting));
        }
        RecognitionFailure::MismatchedRange(e) => {
            fields.insert("a".into(), json!(e.a));
            fields.insert("b".into(), json!(e.b));
        }
        RecognitionFailure::EarlyExit(e) => {
            fields.insert("decision_number".into(), json!(e.decision_number));
        }
        RecognitionFailure::FailedPredicate(e) => {
            fields.insert("rule_name".into(), json!(e.rule_name));
            fields.insert("predicate_text".into(), json!(e.predicate_text));
        }
    }

    Value::Object(fields)
}

fn encode_context(ctx: &FailureContext, fields: &mut Map<String, Value>) {
    fields.insert("stream_kind".into(), json!(ctx.stream_kind));
    fields.insert("index".into(), json!(ctx.index));
    fields.insert("line".into(), json!(ctx.line));
    fields.insert(
        "char_position_in_line".into(),
        json!(ctx.char_position_in_line),
    );
    fields.insert(
        "approximate_line_info".into(),
        json!(ctx.approximate_line_info),
    );
    fields.insert("source_name".into(), json!(ctx.source_name));
    fields.insert("character".into(), json!(ctx.character));
    fields.insert("token".into(), json!(ctx.token));
}

/// Rebuild a failure from a field set produced by [`encode`].
pub fn decode(fields: Option<&Value>) -> Result<RecognitionFailure, FailureError> {
    let fields = fields.ok_or_else(|| FailureError::invalid_argument("fields"))?;
    let obj = fields
        .as_object()
        .ok_or_else(|| FailureError::invalid_field("fields", "expected a JSON object"))?;

    let version = obj
        .get("format_version")
        .ok_or_else(|| missing("format_version"))?
        .as_u64()
        .ok_or_else(|| FailureError::invalid_field("format_version", "expected an integer"))?;
    if version != FIELD_FORMAT_VERSION {
        return Err(FailureError::UnsupportedVersion { found: version });
    }

    let kind = required_str(obj, "kind")?;
    let context = decode_context(obj)?;

    let failure = match kind.as_str() {
        "NoViableAlternative" => {
            RecognitionFailure::NoViableAlternative(NoViableAlternative::from_parts(
                context,
                required_str(obj, "decision_description")?,
                required_u32(obj, "decision_number")?,
                required_u32(obj, "state_number")?,
            ))
        }
        "MismatchedToken" => RecognitionFailure::MismatchedToken(MismatchedToken {
            context,
            expecting: required_i32(obj, "expecting")?,
        }),
        "MissingToken" => RecognitionFailure::MissingToken(MissingToken {
            context,
            expecting: required_i32(obj, "expecting")?,
            inserted: optional_str(obj, "inserted")?,
        }),
        "UnwantedToken" => RecognitionFailure::UnwantedToken(UnwantedToken {
            context,
            expecting: required_i32(obj, "expecting")?,
        }),
        "MismatchedSet" => {
            let expecting = obj
                .get("expecting")
                .ok_or_else(|| missing("expecting"))?
                .as_array()
                .ok_or_else(|| FailureError::invalid_field("expecting", "expected an array"))?
                .iter()
                .map(|v| as_i32(v, "expecting"))
                .collect::<Result<Vec<_>, _>>()?;
            RecognitionFailure::MismatchedSet(MismatchedSet { context, expecting })
        }
        "MismatchedRange" => RecognitionFailure::MismatchedRange(MismatchedRange {
            context,
            a: required_i32(obj, "a")?,
            b: required_i32(obj, "b")?,
        }),
        "EarlyExit" => RecognitionFailure::EarlyExit(EarlyExit {
            context,
            decision_number: required_u32(obj, "decision_number")?,
        }),
        "FailedPredicate" => RecognitionFailure::FailedPredicate(FailedPredicate {
            context,
            rule_name: required_str(obj, "rule_name")?,
            predicate_text: required_str(obj, "predicate_text")?,
        }),
        other => {
            return Err(FailureError::UnknownKind {
                kind: other.to_string(),
            })
        }
    };

    Ok(failure)
}

/// Encode to a JSON string.
pub fn to_json_string(failure: &RecognitionFailure) -> String {
    encode(failure).to_string()
}

/// Parse a JSON string and decode it.
pub fn from_json_str(src: &str) -> Result<RecognitionFailure, FailureError> {
    let value: Value = serde_json::from_str(src).map_err(|e| FailureError::Json(e.to_string()))?;
    decode(Some(&value))
}

fn decode_context(obj: &Map<String, Value>) -> Result<FailureContext, FailureError> {
    let stream_kind = serde_json::from_value::<StreamKind>(
        obj.get("stream_kind")
            .ok_or_else(|| missing("stream_kind"))?
            .clone(),
    )
    .map_err(|e| FailureError::invalid_field("stream_kind", e.to_string()))?;

    let index = required_u64(obj, "index")?;
    let index = usize::try_from(index)
        .map_err(|_| FailureError::invalid_field("index", "out of range"))?;

    let approximate_line_info = obj
        .get("approximate_line_info")
        .ok_or_else(|| missing("approximate_line_info"))?
        .as_bool()
        .ok_or_else(|| FailureError::invalid_field("approximate_line_info", "expected a boolean"))?;

    let character = match obj.get("character") {
        None | Some(Value::Null) => None,
        Some(v) => Some(as_i32(v, "character")?),
    };

    let token = match obj.get("token") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            serde_json::from_value::<Token>(v.clone())
                .map_err(|e| FailureError::invalid_field("token", e.to_string()))?,
        ),
    };

    // Capture fills exactly one of the two, by stream kind.
    match stream_kind {
        StreamKind::Character if token.is_some() => {
            return Err(FailureError::invalid_field(
                "token",
                "character stream failures carry no token",
            ))
        }
        StreamKind::Symbol if character.is_some() => {
            return Err(FailureError::invalid_field(
                "character",
                "symbol stream failures carry no character",
            ))
        }
        _ => {}
    }

    Ok(FailureContext {
        stream_kind,
        index,
        token,
        character,
        line: required_u32(obj, "line")?,
        char_position_in_line: required_u32(obj, "char_position_in_line")?,
        approximate_line_info,
        source_name: optional_str(obj, "source_name")?,
    })
}

// ── Field helpers ───────────────────────────────────────────────────

fn missing(field: &str) -> FailureError {
    FailureError::MissingField {
        field: field.to_string(),
    }
}

fn required_str(obj: &Map<String, Value>, field: &str) -> Result<String, FailureError> {
    obj.get(field)
        .ok_or_else(|| missing(field))?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| FailureError::invalid_field(field, "expected a string"))
}

fn optional_str(obj: &Map<String, Value>, field: &str) -> Result<Option<String>, FailureError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FailureError::invalid_field(field, "expected a string or null")),
    }
}

fn required_u64(obj: &Map<String, Value>, field: &str) -> Result<u64, FailureError> {
    obj.get(field)
        .ok_or_else(|| missing(field))?
        .as_u64()
        .ok_or_else(|| FailureError::invalid_field(field, "expected a non-negative integer"))
}

fn required_u32(obj: &Map<String, Value>, field: &str) -> Result<u32, FailureError> {
    let n = required_u64(obj, field)?;
    u32::try_from(n).map_err(|_| FailureError::invalid_field(field, "out of range"))
}

fn required_i32(obj: &Map<String, Value>, field: &str) -> Result<i32, FailureError> {
    as_i32(obj.get(field).ok_or_else(|| missing(field))?, field)
}

fn as_i32(v: &Value, field: &str) -> Result<i32, FailureError> {
    v.as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| FailureError::invalid_field(field, "expected a 32-bit integer"))
}
