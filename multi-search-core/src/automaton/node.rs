use super::index::*;
use std::ops::Range;

/// One vertex of a compiled [Automaton](crate::Automaton).
///
/// A node represents one distinct prefix across all inserted patterns.
/// Its transitions and recognized patterns are stored in the automaton's
/// shared edge and output arrays, referenced here by index ranges.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    /// The node representing the longest proper suffix of this node's prefix
    /// that is itself a prefix in the trie.
    /// The root is the only node that is its own failure target.
    pub failure: IndexNode,

    /// The range of this node's outgoing transitions in the edge array,
    /// sorted by symbol.
    pub edges: Range<IndexEdge>,

    /// The range of this node's recognized patterns in the output array.
    /// Already closed under failure-following: no failure chain needs to be
    /// walked at match time.
    pub outputs: Range<IndexOutput>,
}

/// One outgoing transition of a [Node](self::Node).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Edge<S> {
    /// The symbol labelling the transition.
    pub symbol: S,

    /// The node reached by following the transition.
    pub target: IndexNode,
}

/// A pattern registered in the automaton.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PatternEntry<P> {
    /// The caller-supplied identifier, not assumed to be unique.
    pub id: P,

    /// The pattern length in symbols, needed to recover the start position
    /// of a match from its end position.
    pub len: u32,
}
