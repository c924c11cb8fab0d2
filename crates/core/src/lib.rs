//! recog-core: recognition failure model for table-driven recognizers.
//!
//! When decision prediction finds no viable alternative, or a match step
//! sees the wrong symbol, the recognizer builds a [`RecognitionFailure`]
//! from its input stream. The value snapshots everything a reporter or
//! recovery strategy needs, renders without touching the stream again,
//! and can be torn down into a flat field set and rebuilt elsewhere.
//!
//! # Public API
//!
//! - [`RecognitionFailure`] -- the closed set of failure kinds
//! - [`NoViableAlternative`] -- decision point with no matching alternative
//! - [`FailureContext`] -- input state shared by every kind
//! - [`IntStream`], [`CharStream`], [`TokenStream`], [`StreamKind`] -- input
//! - [`codec::encode`] / [`codec::decode`] -- field-set transport
//! - [`diagnostic::render`] -- `line L:C message` for end users
//! - [`FailureError`] -- construction and reconstruction errors

pub mod codec;
pub mod diagnostic;
pub mod error;
pub mod failure;
pub mod snapshot;
pub mod stream;

// ── Convenience re-exports ───────────────────────────────────────────

pub use codec::{decode, encode, FIELD_FORMAT_VERSION};
pub use error::FailureError;
pub use failure::{
    EarlyExit, FailedPredicate, MismatchedRange, MismatchedSet, MismatchedToken, MissingToken,
    NoViableAlternative, RecognitionFailure, UnwantedToken,
};
pub use snapshot::FailureContext;
pub use stream::{CharStream, IntStream, StreamKind, Token, TokenStream, EOF, INVALID_TOKEN_TYPE};
