use std::path::Path;
use std::process;

use recog_core::{codec, diagnostic};

use crate::{report_error, OutputFormat};

/// Decode a failure field set and print its rendering and diagnostic.
pub(crate) fn cmd_explain(
    path: &Path,
    token_names: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) {
    let src = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let failure = match codec::from_json_str(&src) {
        Ok(f) => f,
        Err(e) => {
            let msg = format!("error decoding failure in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let names: Option<Vec<&str>> = token_names.map(|s| s.split(',').map(str::trim).collect());
    let header = diagnostic::error_header(&failure);
    let message = diagnostic::error_message(&failure, names.as_deref());

    match output {
        OutputFormat::Json => {
            let mut report = serde_json::json!({
                "failure": failure.to_string(),
                "kind": failure.kind_name(),
                "header": header,
                "message": message,
            });
            if let Some(nva) = failure.as_no_viable_alternative() {
                report["decision_number"] = serde_json::json!(nva.decision_number());
                report["state_number"] = serde_json::json!(nva.state_number());
                report["decision_description"] = serde_json::json!(nva.decision_description());
            }
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!("{}", failure);
            println!("{} {}", header, message);
            if let Some(nva) = failure.as_no_viable_alternative() {
                if !quiet {
                    println!(
                        "decision {} (state {}): {}",
                        nva.decision_number(),
                        nva.state_number(),
                        nva.decision_description()
                    );
                }
            }
        }
    }
}
