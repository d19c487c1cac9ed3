//! The compiled multi-pattern automaton: flat immutable arrays built once
//! from a [TrieBuilder](crate::TrieBuilder), then only ever read by matchers.

pub mod automaton;
pub mod from_builder;
pub mod index;
pub mod node;
pub mod scan;
