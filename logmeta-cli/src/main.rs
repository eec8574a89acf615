//! logmeta CLI - reports Elixir Logger metadata the backend will drop.
//!
//! Reads `*.ast.json` documents produced by an external Elixir parser, checks
//! every logging call against the metadata allow-list, and prints one line per
//! offending call. Exits with 1 when anything was found or a file could not be
//! analysed, so it can gate CI. An internal panic exits with 2.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use logmeta_core::{
    init_structured_logging, load_config, print_json, print_plain, AnalysisResult, MetadataCheck,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find Logger metadata that will be ignored in production")]
pub struct Cli {
    /// Directory containing the parsed AST documents
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Logging functions to leave unchecked (e.g. debug)
    #[arg(long, num_args = 1..)]
    ignore_functions: Vec<String>,

    /// Metadata keys the logging backend renders (overrides logmeta.toml)
    #[arg(long, num_args = 1.., conflicts_with = "all_metadata")]
    metadata_keys: Vec<String>,

    /// The backend renders every metadata key
    #[arg(long)]
    all_metadata: bool,

    /// Logger module name (default: Logger)
    #[arg(long, value_name = "MODULE")]
    logger_module: Option<String>,

    /// Directory names to skip while scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,
}

impl Cli {
    /// Translate flags into a configured run. Flags win over logmeta.toml.
    fn to_check(&self) -> MetadataCheck {
        let mut check = MetadataCheck::new(&self.path)
            .ignore_functions(self.ignore_functions.iter().cloned())
            .exclude_dirs(self.exclude.iter().cloned());

        if self.all_metadata {
            check = check.all_metadata_keys();
        } else if !self.metadata_keys.is_empty() {
            check = check.metadata_keys(self.metadata_keys.iter().cloned());
        }

        if let Some(module) = &self.logger_module {
            check = check.logger_module(module.clone());
        }
        check
    }

    /// JSON when asked for on the command line or in logmeta.toml.
    fn wants_json(&self) -> Result<bool> {
        if self.json {
            return Ok(true);
        }
        let cfg = load_config(&PathBuf::from(&self.path))
            .with_context(|| format!("Failed to load configuration from {}", self.path))?;
        Ok(cfg
            .and_then(|c| c.output)
            .and_then(|o| o.format)
            .is_some_and(|f| f.eq_ignore_ascii_case("json")))
    }
}

/// Exit code for an internal panic.
const PANIC_EXIT_CODE: i32 = 2;

/// 0 when every file was analysed and clean, 1 otherwise.
fn exit_code(result: &AnalysisResult) -> i32 {
    if result.issue_count() == 0 && result.skipped.is_empty() {
        0
    } else {
        1
    }
}

fn panic_report(detail: &str) -> String {
    format!(
        "[PANIC] logmeta internal error: {}\n[PANIC] Exiting with code {}.",
        detail, PANIC_EXIT_CODE
    )
}

fn print_result(result: &AnalysisResult, json: bool) {
    if json {
        print_json(&result.files, &result.skipped);
    } else {
        print_plain(&result.files);
        for skipped in &result.skipped {
            eprintln!("WARN: skipped {}: {}", skipped.path.display(), skipped.reason);
        }
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", panic_report(&info.to_string()));
        std::process::exit(PANIC_EXIT_CODE);
    }));

    init_structured_logging();

    let cli = Cli::parse();
    let json = cli.wants_json()?;

    let result = cli
        .to_check()
        .analyze()
        .with_context(|| format!("Failed to analyze {}", cli.path))?;

    print_result(&result, json);

    // Exit code (CI-friendly)
    std::process::exit(exit_code(&result));
}
