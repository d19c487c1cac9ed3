use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as input symbols of an automaton.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`u8`, `char`, `u32`, application-defined tokens, etc.).
///
/// - `Copy`: edges store symbols by value
/// - `Ord`: compiled edge arrays are sorted by symbol and binary-searched
/// - `Hash`: builder transitions are kept in a hash map
/// - `Debug`: debug printing of automaton internals
pub trait Symbol: Copy + Ord + Hash + Debug {}

impl<T: Copy + Ord + Hash + Debug> Symbol for T {}
