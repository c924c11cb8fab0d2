//! The recognition failure taxonomy.
//!
//! A [`RecognitionFailure`] is a closed set of failure kinds, each carrying
//! the shared [`FailureContext`] plus whatever the kind adds. The central
//! kind is [`NoViableAlternative`]: decision prediction reached a point
//! where no alternative matched the lookahead.
//!
//! Values are immutable snapshots. Rendering via `Display` reads only
//! captured state and cannot fail.

use std::fmt;

use crate::error::FailureError;
use crate::snapshot::FailureContext;
use crate::stream::{IntStream, INVALID_TOKEN_TYPE};

/// No alternative at a grammar decision matched the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoViableAlternative {
    context: FailureContext,
    decision_description: String,
    decision_number: u32,
    state_number: u32,
}

impl NoViableAlternative {
    /// Capture `input` and record which decision failed.
    ///
    /// `decision_number` and `state_number` are opaque keys into the
    /// caller's decision tables and are stored unchecked.
    pub fn new(
        decision_description: impl Into<String>,
        decision_number: u32,
        state_number: u32,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(Self::from_parts(
            context,
            decision_description.into(),
            decision_number,
            state_number,
        ))
    }

    /// Assemble from already-captured state, as the codec does.
    pub(crate) fn from_parts(
        context: FailureContext,
        decision_description: String,
        decision_number: u32,
        state_number: u32,
    ) -> Self {
        NoViableAlternative {
            context,
            decision_description,
            decision_number,
            state_number,
        }
    }

    pub fn decision_number(&self) -> u32 {
        self.decision_number
    }

    pub fn decision_description(&self) -> &str {
        &self.decision_description
    }

    pub fn state_number(&self) -> u32 {
        self.state_number
    }

    pub fn context(&self) -> &FailureContext {
        &self.context
    }
}

impl fmt::Display for NoViableAlternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NoViableAlternativeFailure({}@[{}])",
            self.context.unexpected_display(),
            self.decision_description
        )
    }
}

/// The next symbol was not the single token the grammar required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchedToken {
    pub context: FailureContext,
    pub expecting: i32,
}

/// A required token was absent; recovery may have conjured one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingToken {
    pub context: FailureContext,
    pub expecting: i32,
    /// Text of the token recovery inserted, if any.
    pub inserted: Option<String>,
}

/// An extra token sat in front of the one the grammar required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwantedToken {
    pub context: FailureContext,
    pub expecting: i32,
}

/// The next symbol was not in the required set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchedSet {
    pub context: FailureContext,
    pub expecting: Vec<i32>,
}

/// A character fell outside a required `a..b` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchedRange {
    pub context: FailureContext,
    pub a: i32,
    pub b: i32,
}

/// A `(...)+` loop matched zero iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyExit {
    pub context: FailureContext,
    pub decision_number: u32,
}

/// A semantic predicate evaluated to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPredicate {
    pub context: FailureContext,
    pub rule_name: String,
    pub predicate_text: String,
}

/// Every way a recognizer can fail to match its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionFailure {
    NoViableAlternative(NoViableAlternative),
    MismatchedToken(MismatchedToken),
    MissingToken(MissingToken),
    UnwantedToken(UnwantedToken),
    MismatchedSet(MismatchedSet),
    MismatchedRange(MismatchedRange),
    EarlyExit(EarlyExit),
    FailedPredicate(FailedPredicate),
}

impl RecognitionFailure {
    pub fn no_viable_alternative(
        decision_description: impl Into<String>,
        decision_number: u32,
        state_number: u32,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        NoViableAlternative::new(decision_description, decision_number, state_number, input)
            .map(RecognitionFailure::NoViableAlternative)
    }

    pub fn mismatched_token(
        expecting: i32,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::MismatchedToken(MismatchedToken {
            context,
            expecting,
        }))
    }

    pub fn missing_token(
        expecting: i32,
        inserted: Option<String>,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::MissingToken(MissingToken {
            context,
            expecting,
            inserted,
        }))
    }

    pub fn unwanted_token(
        expecting: i32,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::UnwantedToken(UnwantedToken {
            context,
            expecting,
        }))
    }

    pub fn mismatched_set(
        expecting: Vec<i32>,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::MismatchedSet(MismatchedSet {
            context,
            expecting,
        }))
    }

    pub fn mismatched_range(
        a: i32,
        b: i32,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::MismatchedRange(MismatchedRange {
            context,
            a,
            b,
        }))
    }

    pub fn early_exit(
        decision_number: u32,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::EarlyExit(EarlyExit {
            context,
            decision_number,
        }))
    }

    pub fn failed_predicate(
        rule_name: impl Into<String>,
        predicate_text: impl Into<String>,
        input: Option<&dyn IntStream>,
    ) -> Result<Self, FailureError> {
        let context = FailureContext::capture(input)?;
        Ok(RecognitionFailure::FailedPredicate(FailedPredicate {
            context,
            rule_name: rule_name.into(),
            predicate_text: predicate_text.into(),
        }))
    }

    pub fn context(&self) -> &FailureContext {
        match self {
            RecognitionFailure::NoViableAlternative(f) => &f.context,
            RecognitionFailure::MismatchedToken(f) => &f.context,
            RecognitionFailure::MissingToken(f) => &f.context,
            RecognitionFailure::UnwantedToken(f) => &f.context,
            RecognitionFailure::MismatchedSet(f) => &f.context,
            RecognitionFailure::MismatchedRange(f) => &f.context,
            RecognitionFailure::EarlyExit(f) => &f.context,
            RecognitionFailure::FailedPredicate(f) => &f.context,
        }
    }

    /// Stable name of the variant, also used as the codec's `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RecognitionFailure::NoViableAlternative(_) => "NoViableAlternative",
            RecognitionFailure::MismatchedToken(_) => "MismatchedToken",
            RecognitionFailure::MissingToken(_) => "MissingToken",
            RecognitionFailure::UnwantedToken(_) => "UnwantedToken",
            RecognitionFailure::MismatchedSet(_) => "MismatchedSet",
            RecognitionFailure::MismatchedRange(_) => "MismatchedRange",
            RecognitionFailure::EarlyExit(_) => "EarlyExit",
            RecognitionFailure::FailedPredicate(_) => "FailedPredicate",
        }
    }

    pub fn unexpected_type(&self) -> i32 {
        self.context().unexpected_type()
    }

    pub fn as_no_viable_alternative(&self) -> Option<&NoViableAlternative> {
        match self {
            RecognitionFailure::NoViableAlternative(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for RecognitionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionFailure::NoViableAlternative(e) => write!(f, "{}", e),
            RecognitionFailure::MismatchedToken(e) => write!(
                f,
                "MismatchedTokenFailure({}!={})",
                e.context.unexpected_type(),
                e.expecting
            ),
            RecognitionFailure::MissingToken(e) => {
                let at = e.context.token.as_ref().map(|t| t.text.as_str());
                match (&e.inserted, at) {
                    (Some(inserted), Some(text)) => {
                        write!(f, "MissingTokenFailure(inserted {} at {})", inserted, text)
                    }
                    (None, Some(text)) => write!(f, "MissingTokenFailure(at {})", text),
                    _ => write!(f, "MissingTokenFailure"),
                }
            }
            RecognitionFailure::UnwantedToken(e) => {
                let found = e
                    .context
                    .token
                    .as_ref()
                    .map_or("null", |t| t.text.as_str());
                if e.expecting == INVALID_TOKEN_TYPE {
                    write!(f, "UnwantedTokenFailure(found={})", found)
                } else {
                    write!(
                        f,
                        "UnwantedTokenFailure(found={}, expected {})",
                        found, e.expecting
                    )
                }
            }
            RecognitionFailure::MismatchedSet(e) => write!(
                f,
                "MismatchedSetFailure({}!={:?})",
                e.context.unexpected_type(),
                e.expecting
            ),
            RecognitionFailure::MismatchedRange(e) => write!(
                f,
                "MismatchedRangeFailure({} not in [{},{}])",
                e.context.unexpected_type(),
                e.a,
                e.b
            ),
            RecognitionFailure::EarlyExit(e) => write!(
                f,
                "EarlyExitFailure({}@{})",
                e.context.unexpected_display(),
                e.decision_number
            ),
            RecognitionFailure::FailedPredicate(e) => write!(
                f,
                "FailedPredicateFailure({},{{{}}}?)",
                e.rule_name, e.predicate_text
            ),
        }
    }
}

impl std::error::Error for RecognitionFailure {}

impl From<NoViableAlternative> for RecognitionFailure {
    fn from(value: NoViableAlternative) -> Self {
        RecognitionFailure::NoViableAlternative(value)
    }
}
