//! CLI argument definitions, tracing setup, and command execution.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use docfill_core::{Mode, SubstituteConfig};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docfill — fill templated Word documents from a JSON keyword map.
#[derive(Parser)]
#[command(
    name = "docfill",
    version,
    about = "Replace placeholder keywords in a Word document's tables with configured values.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Word document (.docx) to fill.
    pub document: PathBuf,

    /// JSON config mapping objects and properties to keyword/value pairs.
    pub config: PathBuf,

    /// Traversal mode: table (default) or paragraph (declared, no-op).
    #[arg(long, default_value = "table")]
    pub mode: String,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!(
        "docfill={level},docfill_core={level},docfill_docx={level},docfill_shared={level}"
    );

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

/// Run the substitution.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let mode: Mode = cli.mode.parse()?;

    let config = SubstituteConfig {
        document_path: cli.document,
        config_path: cli.config,
        mode,
    };

    info!(
        document = %config.document_path.display(),
        config = %config.config_path.display(),
        "filling document"
    );

    let result = docfill_core::substitute(&config)?;

    println!();
    println!("  Document filled successfully!");
    println!("  Keywords:     {}", result.keywords);
    println!("  Tables:       {}", result.tables);
    println!("  Paragraphs:   {}", result.paragraphs);
    println!("  Replacements: {}", result.replacements);
    println!("  Output:       {}", result.output_path.display());
    println!("  Time:         {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}
