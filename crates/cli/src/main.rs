mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Default when `--output` is not given: `RECOG_OUTPUT`, else text.
    fn from_env() -> OutputFormat {
        std::env::var("RECOG_OUTPUT")
            .ok()
            .and_then(|v| OutputFormat::from_str(v.trim(), true).ok())
            .unwrap_or(OutputFormat::Text)
    }
}

/// Recognition failure capture and inspection.
#[derive(Parser)]
#[command(
    name = "recog",
    version,
    about = "Recognition failure capture and inspection"
)]
struct Cli {
    /// Output format (text or json); defaults to $RECOG_OUTPUT, then text
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a no-viable-alternative failure at a position in a file
    Capture {
        /// Path to the input file, read as a character stream
        file: PathBuf,
        /// Character index of the offending symbol
        #[arg(long, default_value = "0")]
        at: usize,
        /// Decision number in the grammar's decision table
        #[arg(long)]
        decision: u32,
        /// Automaton state active at the failure
        #[arg(long)]
        state: u32,
        /// Human-readable label of the decision
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Explain a serialized failure field set
    Explain {
        /// Path to the failure JSON (as written by `capture`)
        file: PathBuf,
        /// Comma-separated token names, indexed by token type
        #[arg(long)]
        token_names: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let output = cli.output.unwrap_or_else(OutputFormat::from_env);

    match cli.command {
        Commands::Capture {
            file,
            at,
            decision,
            state,
            description,
        } => {
            commands::capture::cmd_capture(
                &file,
                at,
                decision,
                state,
                &description,
                output,
                cli.quiet,
            );
        }
        Commands::Explain { file, token_names } => {
            commands::explain::cmd_explain(&file, token_names.as_deref(), output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
