//! The core library for the multi-search binaries.
//!
//! Build a multi-pattern matching automaton
//! ([Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm))
//! once from a finite set of patterns, then scan arbitrarily long inputs and
//! report every occurrence of every pattern in a single linear pass.
//!
//! Define the shared data structures and the automaton file format used by
//! both binaries.

mod automaton;
mod automaton_file;
mod error;
mod symbol;
mod trie_builder;
mod utils;

pub use automaton::{
    automaton::Automaton,
    scan::{Cursor, Match, Matches, StepMatches},
};
pub use automaton_file::{AutomatonFile, ByteAutomaton, Header};
pub use error::{Error, Result};
pub use symbol::Symbol;
pub use trie_builder::TrieBuilder;
