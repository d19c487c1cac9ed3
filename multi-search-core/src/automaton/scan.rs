//! Streaming traversal of a compiled [Automaton](crate::Automaton):
//! a resumable [Cursor](self::Cursor) advanced one symbol at a time, and the
//! lazy [Matches](self::Matches) iterator built on top of it.

use super::{
    automaton::Automaton,
    index::{IndexNode, IndexPattern},
    node::PatternEntry,
};
use crate::Symbol;
use std::ops::Range;

/// A single reported occurrence of a pattern in the scanned input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Match<'a, P> {
    /// The caller-supplied identifier of the matched pattern.
    pub pattern_id: &'a P,

    /// Position of the first matched symbol (0-indexed).
    /// For the empty pattern this is `end + 1`: an empty span.
    pub start: usize,

    /// Position of the last matched symbol (0-indexed, inclusive).
    pub end: usize,
}

/// The mutable state of one matcher: the current node and the number of
/// symbols consumed so far.
///
/// A cursor starts at the root (see [Automaton::cursor]) and is advanced one
/// symbol at a time with [step](Cursor::step), which makes chunked input
/// scanning possible: feed the symbols of each chunk in order and matches
/// spanning chunk boundaries are reported with stream-global positions.
///
/// The compiled automaton itself is never mutated, so any number of cursors
/// can scan the same shared automaton concurrently.
#[derive(Debug, Clone)]
pub struct Cursor {
    node: IndexNode,
    position: usize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            node: IndexNode::ROOT,
            position: 0,
        }
    }

    /// The number of symbols consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume one input symbol and return the matches ending at its
    /// position.
    ///
    /// The cursor must only ever be advanced against the automaton it was
    /// created from.
    pub fn step<'a, S: Symbol, P: Clone>(
        &mut self,
        automaton: &'a Automaton<S, P>,
        symbol: S,
    ) -> StepMatches<'a, P> {
        let mut node = self.node;

        // Follow failure links until a node with a transition on the symbol
        // is found. The loop terminates because the root is its own failure
        // target and is handled explicitly.
        self.node = loop {
            match automaton.transition(node, symbol) {
                Some(next) => break next,
                // No transition anywhere in the trie: stay at the root
                None if node == IndexNode::ROOT => break node,
                None => node = automaton.failure(node),
            }
        };

        let end = self.position;
        self.position += 1;

        let outputs = automaton.node(self.node).outputs.clone();
        StepMatches {
            outputs: automaton.outputs(),
            patterns: automaton.patterns(),
            pending: *outputs.start..*outputs.end,
            end,
        }
    }
}

/// The matches produced by a single [Cursor::step]: the patterns recognized
/// at the node reached after consuming one symbol.
///
/// The output set is closed at compile time, so this is a plain slice walk,
/// never a failure-chain traversal.
#[derive(Debug)]
pub struct StepMatches<'a, P> {
    outputs: &'a [IndexPattern],
    patterns: &'a [PatternEntry<P>],
    pending: Range<u32>,
    end: usize,
}

impl<'a, P> Iterator for StepMatches<'a, P> {
    type Item = Match<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let output_pos = self.pending.next()?;
        let pattern_pos = self.outputs[output_pos as usize];
        let pattern = &self.patterns[*pattern_pos as usize];

        Some(Match {
            pattern_id: &pattern.id,
            // The pattern length is known from insertion, so the start
            // position derives from the end position.
            start: self.end + 1 - pattern.len as usize,
            end: self.end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

impl<P> ExactSizeIterator for StepMatches<'_, P> {}

/// Lazy sequence of every occurrence of every pattern in an input stream,
/// in one linear pass.
///
/// Pull-based: each input symbol is processed exactly once before the next
/// one is consumed, so dropping the iterator early wastes no work. Total
/// work is `O(input length + number of matches)`, independent of the number
/// and lengths of the patterns.
///
/// Overlapping and nested matches are all reported; consumers needing a
/// non-overlapping selection apply it themselves.
pub struct Matches<'a, S: Symbol, P: Clone, I> {
    automaton: &'a Automaton<'a, S, P>,
    input: I,
    cursor: Cursor,
    pending: Option<StepMatches<'a, P>>,
}

impl<'a, S: Symbol, P: Clone, I: Iterator<Item = S>> Iterator for Matches<'a, S, P, I> {
    type Item = Match<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(found) = self.pending.as_mut().and_then(Iterator::next) {
                return Some(found);
            }

            let symbol = self.input.next()?;
            self.pending = Some(self.cursor.step(self.automaton, symbol));
        }
    }
}

impl<'a, S: Symbol, P: Clone> Automaton<'a, S, P> {
    /// Scan an input sequence and return the lazy stream of matches.
    ///
    /// ```
    /// use multi_search_core::TrieBuilder;
    ///
    /// let mut builder = TrieBuilder::new();
    /// builder.insert(b"he", "he");
    /// builder.insert(b"she", "she");
    /// let automaton = builder.compile();
    ///
    /// let ends: Vec<usize> = automaton.scan("ushers".bytes()).map(|m| m.end).collect();
    /// assert_eq!(ends, vec![3, 3]);
    /// ```
    pub fn scan<I>(&self, input: I) -> Matches<'_, S, P, I::IntoIter>
    where
        I: IntoIterator<Item = S>,
    {
        Matches {
            automaton: self,
            input: input.into_iter(),
            cursor: self.cursor(),
            pending: None,
        }
    }

    /// Create a cursor positioned at the root, to scan chunked input with
    /// [Cursor::step].
    pub fn cursor(&self) -> Cursor {
        Cursor::new()
    }
}
