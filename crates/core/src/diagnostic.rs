//! Human-oriented rendering of failures for error reporters.
//!
//! `Display` on a failure is a compact debugging form; the functions here
//! produce the `line L:C` header and the English sentence a recognizer
//! prints for its user.

use crate::failure::RecognitionFailure;
use crate::snapshot::{char_display, FailureContext};
use crate::stream::{StreamKind, Token, EOF};

/// `"line 3:14"`, prefixed with the source name when one was captured.
pub fn error_header(failure: &RecognitionFailure) -> String {
    let ctx = failure.context();
    match &ctx.source_name {
        Some(name) => format!(
            "{} line {}:{}",
            name, ctx.line, ctx.char_position_in_line
        ),
        None => format!("line {}:{}", ctx.line, ctx.char_position_in_line),
    }
}

/// Describe the failure in a sentence.
///
/// `token_names` maps token types to display names; types without a name
/// render as their number.
pub fn error_message(failure: &RecognitionFailure, token_names: Option<&[&str]>) -> String {
    let ctx = failure.context();
    match ctx.stream_kind {
        StreamKind::Symbol => symbol_message(failure, ctx, token_names),
        StreamKind::Character => character_message(failure, ctx),
    }
}

/// Header and message on one line, as a reporter emits them.
pub fn render(failure: &RecognitionFailure, token_names: Option<&[&str]>) -> String {
    format!(
        "{} {}",
        error_header(failure),
        error_message(failure, token_names)
    )
}

fn symbol_message(
    failure: &RecognitionFailure,
    ctx: &FailureContext,
    token_names: Option<&[&str]>,
) -> String {
    let at = token_display(ctx);
    let name = |t: i32| token_name(t, token_names);
    match failure {
        RecognitionFailure::NoViableAlternative(_) => {
            format!("no viable alternative at input {}", at)
        }
        RecognitionFailure::MismatchedToken(e) => {
            format!("mismatched input {} expecting {}", at, name(e.expecting))
        }
        RecognitionFailure::MissingToken(e) => format!("missing {} at {}", name(e.expecting), at),
        RecognitionFailure::UnwantedToken(e) => {
            format!("extraneous input {} expecting {}", at, name(e.expecting))
        }
        RecognitionFailure::MismatchedSet(e) => {
            let set: Vec<String> = e.expecting.iter().map(|t| name(*t)).collect();
            format!(
                "mismatched input {} expecting set {{{}}}",
                at,
                set.join(", ")
            )
        }
        RecognitionFailure::MismatchedRange(e) => format!(
            "mismatched input {} expecting range {}..{}",
            at,
            name(e.a),
            name(e.b)
        ),
        RecognitionFailure::EarlyExit(_) => {
            format!("required (...)+ loop did not match anything at input {}", at)
        }
        RecognitionFailure::FailedPredicate(e) => predicate_message(&e.rule_name, &e.predicate_text),
    }
}

fn character_message(failure: &RecognitionFailure, ctx: &FailureContext) -> String {
    let c = quoted_char(ctx.unexpected_type());
    match failure {
        RecognitionFailure::NoViableAlternative(_) => {
            format!("no viable alternative at character {}", c)
        }
        RecognitionFailure::MismatchedToken(e) => format!(
            "mismatched character {} expecting {}",
            c,
            quoted_char(e.expecting)
        ),
        RecognitionFailure::MissingToken(e) => {
            format!("missing {} at character {}", quoted_char(e.expecting), c)
        }
        RecognitionFailure::UnwantedToken(e) => format!(
            "extraneous character {} expecting {}",
            c,
            quoted_char(e.expecting)
        ),
        RecognitionFailure::MismatchedSet(e) => {
            let set: Vec<String> = e.expecting.iter().map(|x| quoted_char(*x)).collect();
            format!(
                "mismatched character {} expecting set {{{}}}",
                c,
                set.join(", ")
            )
        }
        RecognitionFailure::MismatchedRange(e) => format!(
            "mismatched character {} expecting set {}..{}",
            c,
            quoted_char(e.a),
            quoted_char(e.b)
        ),
        RecognitionFailure::EarlyExit(_) => format!(
            "required (...)+ loop did not match anything at character {}",
            c
        ),
        RecognitionFailure::FailedPredicate(e) => predicate_message(&e.rule_name, &e.predicate_text),
    }
}

fn predicate_message(rule_name: &str, predicate_text: &str) -> String {
    format!("rule {} failed predicate: {{{}}}?", rule_name, predicate_text)
}

fn token_name(token_type: i32, token_names: Option<&[&str]>) -> String {
    if token_type == EOF {
        return "EOF".to_string();
    }
    usize::try_from(token_type)
        .ok()
        .and_then(|i| token_names.and_then(|names| names.get(i)))
        .map_or_else(|| token_type.to_string(), |n| (*n).to_string())
}

fn token_display(ctx: &FailureContext) -> String {
    let text = match &ctx.token {
        Some(Token { text, .. }) if !text.is_empty() => text.clone(),
        Some(t) if t.is_eof() => "<EOF>".to_string(),
        Some(t) => format!("<{}>", t.token_type),
        None => "<EOF>".to_string(),
    };
    format!("'{}'", escape_whitespace(&text))
}

fn quoted_char(code: i32) -> String {
    format!("'{}'", escape_whitespace(&char_display(code)))
}

fn escape_whitespace(s: &str) -> String {
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
