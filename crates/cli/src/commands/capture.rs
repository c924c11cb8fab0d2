use std::path::Path;
use std::process;

use recog_core::{codec, CharStream, IntStream, RecognitionFailure};

use crate::{report_error, OutputFormat};

/// Read `path` as a character stream, position it at `at`, and print the
/// encoded field set of a no-viable-alternative failure raised there.
pub(crate) fn cmd_capture(
    path: &Path,
    at: usize,
    decision: u32,
    state: u32,
    description: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut input = CharStream::new(&text).with_source_name(path.display().to_string());
    if at > input.size() {
        let msg = format!(
            "index {} is past the end of '{}' ({} characters)",
            at,
            path.display(),
            input.size()
        );
        report_error(&msg, output, quiet);
        process::exit(1);
    }
    input.seek(at);

    let failure =
        match RecognitionFailure::no_viable_alternative(description, decision, state, Some(&input))
        {
            Ok(f) => f,
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        };

    let fields = codec::encode(&failure);
    let pretty = serde_json::to_string_pretty(&fields)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);

    if !quiet && output == OutputFormat::Text {
        eprintln!("Captured {}", failure);
    }
}
