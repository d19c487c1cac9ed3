//! The query binary of the multi-search project.
//!
//! Listen for actions in [the standard input stream](std::io::stdin)
//! of the syntax `scan <TEXT>` to report every occurrence of every
//! compiled pattern inside the text, in one linear pass.
//!
//! See the [multi-search-index](../multi_search_index/index.html) crate for
//! documentation about the automaton compiler binary.
//!
//! See the [multi-search-core](../multi_search_core/index.html) crate for
//! documentation about types and functions shared by the binaries.

use error::*;
use multi_search_core::AutomatonFile;
use snafu::*;
use std::path::PathBuf;

mod error;
mod query;

/// Represents the expected parsed program arguments.
#[derive(Debug)]
struct Args {
    automaton_path: PathBuf,
}

/// Parse the arguments and return an error if the wrong number is given or a parsing error happens.
fn parse_args() -> Result<Args> {
    const BIN_NAME_DEFAULT: &str = "multi-search";
    let mut args = std::env::args();

    let bin_name = args.next().unwrap_or_else(|| BIN_NAME_DEFAULT.to_string());
    let cliargs_ctx = CliArgs {
        bin_name: &bin_name,
    };

    let automaton_path = args.next().context(cliargs_ctx)?.into();

    // Make sure no more argument has been given
    if args.next().is_some() {
        None.context(cliargs_ctx)?;
    }

    Ok(Args { automaton_path })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let automaton_file = AutomatonFile::read_file(&args.automaton_path).context(AutomatonRead {
        path: args.automaton_path,
    })?;

    query::process_stdin_queries(&automaton_file.automaton)
}
