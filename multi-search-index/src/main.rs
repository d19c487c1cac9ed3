//! The automaton compiler binary of the multi-search project.
//!
//! Read a pattern list file (one pattern per line, blank lines skipped) and
//! compile it once into a multi-pattern matching automaton, written to disk
//! in the [multi-search-core](../multi_search_core/index.html) binary format.
//! The pattern id of each line is its 0-based position among the kept lines.
//!
//! See the [multi-search](../multi_search/index.html) crate for
//! documentation about the query binary.

use error::*;
use multi_search_core::{AutomatonFile, TrieBuilder};
use smartstring::alias::String as SmartString;
use snafu::*;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

mod error;

/// Represents the expected parsed program arguments.
#[derive(Debug)]
struct Args {
    patterns_path: PathBuf,
    output_path: PathBuf,
}

/// Parse the arguments and return an error if the wrong number is given or a parsing error happens.
fn parse_args() -> Result<Args> {
    const BIN_NAME_DEFAULT: &str = "multi-search-index";
    let mut args = std::env::args();

    let bin_name = args.next().unwrap_or_else(|| BIN_NAME_DEFAULT.to_string());
    let cliargs_ctx = CliArgs {
        bin_name: &bin_name,
    };

    let patterns_path = args.next().context(cliargs_ctx)?.into();
    let output_path = args.next().context(cliargs_ctx)?.into();

    // Make sure no more argument has been given
    if args.next().is_some() {
        None.context(cliargs_ctx)?;
    }

    Ok(Args {
        patterns_path,
        output_path,
    })
}

/// Read the pattern list, one pattern per line.
/// Most patterns are short words, so they are held in small-string storage
/// while building the trie.
fn read_patterns(path: &Path) -> Result<Vec<SmartString>> {
    let file = File::open(path).context(FileOpen { path })?;
    let reader = BufReader::new(file);

    let mut patterns = Vec::new();
    for line in reader.lines() {
        let line = line.context(FileRead { path })?;
        let pattern = line.trim_end_matches(&['\r', '\n'][..]);

        // A blank line is a separator, not an empty pattern
        if pattern.is_empty() {
            continue;
        }

        patterns.push(SmartString::from(pattern));
    }

    Ok(patterns)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let patterns = read_patterns(&args.patterns_path)?;

    let mut builder = TrieBuilder::new();
    for (id, pattern) in patterns.iter().enumerate() {
        builder.insert(pattern.as_bytes(), id as u32);
    }
    let automaton = builder.compile();

    AutomatonFile::from(automaton)
        .write_file(&args.output_path)
        .context(AutomatonWrite {
            path: args.output_path,
        })?;

    Ok(())
}
