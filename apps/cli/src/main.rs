//! docfill CLI — fill templated Word documents from a JSON keyword map.
//!
//! Scans every table cell of a `.docx` document, replaces configured
//! placeholder keywords with their values, and writes the result to
//! `modified_<filename>`.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    // Usage errors (wrong argument count, unknown flags) exit with status 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    commands::init_tracing(&cli);
    commands::run(cli)
}
