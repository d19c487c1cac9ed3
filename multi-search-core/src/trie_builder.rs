use crate::{automaton::node::PatternEntry, Automaton, Symbol};
use std::collections::HashMap;

/// A prefix trie under construction, one node per distinct prefix across all
/// inserted patterns.
///
/// This is the only mutable phase of the automaton lifecycle: patterns are
/// inserted here, then [compile](TrieBuilder::compile) consumes the builder
/// and returns the immutable [Automaton](crate::Automaton). An uncompiled
/// automaton therefore cannot be handed to a matcher.
pub struct TrieBuilder<S: Symbol, P> {
    pub(crate) nodes: Vec<BuilderNode<S>>,
    pub(crate) patterns: Vec<PatternEntry<P>>,
}

/// A mutable trie node. Nodes reference each other by position in the
/// builder's node vector, never by direct reference.
pub(crate) struct BuilderNode<S> {
    /// Outgoing transitions, keyed by symbol.
    pub(crate) transitions: HashMap<S, u32>,

    /// Positions in the pattern table of the patterns ending exactly at this
    /// node. The closure over failure links is computed at compile time.
    pub(crate) outputs: Vec<u32>,
}

impl<S> BuilderNode<S> {
    fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            outputs: Vec::new(),
        }
    }
}

impl<S: Symbol, P> TrieBuilder<S, P> {
    /// Create a builder holding only the root node.
    /// Compiling it as-is yields a valid automaton that never matches.
    pub fn new() -> Self {
        Self {
            nodes: vec![BuilderNode::new()],
            patterns: Vec::new(),
        }
    }

    /// The number of nodes created so far (root included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a pattern into the trie, following or creating one transition
    /// per symbol and recording the pattern at the terminal node.
    ///
    /// Inserting the same `(pattern, id)` pair twice is a no-op, so a match
    /// is never reported twice for it. The same pattern inserted under a
    /// different id is recorded separately and both ids are reported.
    ///
    /// The empty pattern is legal: it is recorded at the root and matches at
    /// every input position.
    pub fn insert(&mut self, pattern: &[S], id: P)
    where
        P: PartialEq,
    {
        let mut current = 0u32;

        for &symbol in pattern {
            current = match self.nodes[current as usize].transitions.get(&symbol) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len() as u32;
                    self.nodes.push(BuilderNode::new());
                    self.nodes[current as usize].transitions.insert(symbol, next);
                    next
                }
            };
        }

        // The terminal node identifies the pattern text, so an id already
        // recorded here means the exact same (pattern, id) pair.
        let node = &self.nodes[current as usize];
        let already_recorded = node
            .outputs
            .iter()
            .any(|&pattern_pos| self.patterns[pattern_pos as usize].id == id);

        if !already_recorded {
            let pattern_pos = self.patterns.len() as u32;
            self.patterns.push(PatternEntry {
                id,
                len: pattern.len() as u32,
            });
            self.nodes[current as usize].outputs.push(pattern_pos);
        }
    }

    /// Compile the trie into an immutable automaton: assign every node its
    /// failure link, close the output sets and flatten everything into
    /// contiguous arrays.
    ///
    /// Consume the builder, so no pattern can be added afterwards.
    pub fn compile(self) -> Automaton<'static, S, P>
    where
        P: Clone,
    {
        Automaton::from(self)
    }
}

impl<S: Symbol, P> Default for TrieBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_node_per_distinct_prefix() {
        let mut builder = TrieBuilder::new();
        builder.insert(b"he", 0u32);
        builder.insert(b"she", 1);
        builder.insert(b"his", 2);
        builder.insert(b"hers", 3);

        // root + h,he + s,sh,she + hi,his + her,hers
        assert_eq!(builder.node_count(), 10);
        assert_eq!(builder.patterns.len(), 4);
    }

    #[test]
    fn shared_prefixes_reuse_nodes() {
        let mut builder = TrieBuilder::new();
        builder.insert(b"ab", 0u32);
        builder.insert(b"abc", 1);

        // root, a, ab, abc
        assert_eq!(builder.node_count(), 4);
    }

    #[test]
    fn duplicate_insertion_is_idempotent() {
        let mut builder = TrieBuilder::new();
        builder.insert(b"he", 0u32);
        builder.insert(b"he", 0);

        assert_eq!(builder.patterns.len(), 1);
        let terminal = &builder.nodes[builder.nodes[builder.nodes[0].transitions[&b'h'] as usize]
            .transitions[&b'e'] as usize];
        assert_eq!(terminal.outputs.len(), 1);
    }

    #[test]
    fn same_pattern_different_ids_both_recorded() {
        let mut builder = TrieBuilder::new();
        builder.insert(b"he", 0u32);
        builder.insert(b"he", 1);

        assert_eq!(builder.patterns.len(), 2);
        // Both end at the same terminal node
        assert_eq!(builder.node_count(), 3);
    }

    #[test]
    fn empty_pattern_recorded_at_root() {
        let mut builder = TrieBuilder::new();
        builder.insert(b"", 0u32);

        assert_eq!(builder.node_count(), 1);
        assert_eq!(builder.nodes[0].outputs, vec![0]);
        assert_eq!(builder.patterns[0].len, 0);
    }
}
