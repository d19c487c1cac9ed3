use super::{
    index::*,
    node::{Edge, Node, PatternEntry},
};
use crate::Symbol;
use std::borrow::Cow;

/// A multi-pattern matching automaton which has been compiled for size and speed.
/// These optimizations come at the cost of not being able to add patterns
/// after compilation.
///
/// This structure implements the
/// [Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm)
/// automaton: a prefix trie over all patterns, augmented with failure links
/// and per-node output sets. This representation has many advantages:
/// - **Not nested**: Nodes refer to each other only by index into flat
///   arrays, which sidesteps ownership cycles (the root is its own failure
///   target and failure chains converge).
/// - **Match-time simplicity**: Output sets are closed under
///   failure-following at compile time, so the matcher never walks a failure
///   chain to collect matches.
/// - **Shareable**: Once compiled the automaton is immutable, and can be
///   scanned by any number of concurrent matchers, each owning only a small
///   [Cursor](crate::Cursor).
#[derive(Debug, Clone)]
pub struct Automaton<'a, S: Symbol, P: Clone> {
    pub(super) nodes: Cow<'a, [Node]>,
    pub(super) edges: Cow<'a, [Edge<S>]>,
    pub(super) outputs: Cow<'a, [IndexPattern]>,
    pub(super) patterns: Cow<'a, [PatternEntry<P>]>,
}

impl<'a, S: Symbol, P: Clone> Automaton<'a, S, P> {
    /// Return a slice of the node array.
    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return a slice of the edge array.
    pub(crate) fn edges(&self) -> &[Edge<S>] {
        &self.edges
    }

    /// Return a slice of the output array.
    pub(crate) fn outputs(&self) -> &[IndexPattern] {
        &self.outputs
    }

    /// Return a slice of the pattern table.
    pub(crate) fn patterns(&self) -> &[PatternEntry<P>] {
        &self.patterns
    }

    /// The number of nodes in the automaton, i.e. the number of distinct
    /// prefixes across all inserted patterns (root included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of registered patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Get a node from the automaton.
    pub(crate) fn node(&self, index: IndexNode) -> &Node {
        &self.nodes[*index as usize]
    }

    /// Get the failure target of a node.
    pub(crate) fn failure(&self, index: IndexNode) -> IndexNode {
        self.node(index).failure
    }

    /// Follow the transition of a node on the given symbol, if it exists.
    pub(crate) fn transition(&self, index: IndexNode, symbol: S) -> Option<IndexNode> {
        let node = self.node(index);
        let edges = &self.edges[*node.edges.start as usize..*node.edges.end as usize];

        edges
            .binary_search_by(|edge| edge.symbol.cmp(&symbol))
            .ok()
            .map(|pos| edges[pos].target)
    }

    /// Create a borrowing automaton from raw array slices, typically mmaped
    /// from an automaton file.
    pub(crate) fn from_parts(
        nodes: &'a [Node],
        edges: &'a [Edge<S>],
        outputs: &'a [IndexPattern],
        patterns: &'a [PatternEntry<P>],
    ) -> Self {
        Automaton {
            nodes: Cow::Borrowed(nodes),
            edges: Cow::Borrowed(edges),
            outputs: Cow::Borrowed(outputs),
            patterns: Cow::Borrowed(patterns),
        }
    }
}
