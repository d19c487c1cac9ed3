//! Compilation of a [TrieBuilder](crate::TrieBuilder) into an
//! [Automaton](crate::Automaton): breadth-first failure-link resolution,
//! output-set closure, and flattening of the nodes into contiguous arrays.

use super::{
    automaton::Automaton,
    index::*,
    node::{Edge, Node},
};
use crate::{
    trie_builder::{BuilderNode, TrieBuilder},
    Symbol,
};
use std::{borrow::Cow, collections::VecDeque};

/// The builder's root node position, fixed by [TrieBuilder::new].
const ROOT: u32 = 0;

/// Assign every node its failure link: the node representing the longest
/// proper suffix of its prefix that is also a prefix in the trie.
///
/// The traversal must be breadth-first: a node's failure link depends on its
/// parent's failure link being already resolved, which only holds when nodes
/// are processed level by level.
fn resolve_failures<S: Symbol>(nodes: &[BuilderNode<S>]) -> Vec<u32> {
    let mut failure = vec![ROOT; nodes.len()];
    let mut queue = VecDeque::new();

    // Depth-1 nodes fail to the root (their only proper suffix is empty)
    queue.extend(nodes[ROOT as usize].transitions.values().copied());

    while let Some(parent) = queue.pop_front() {
        for (&symbol, &child) in &nodes[parent as usize].transitions {
            // Walk the parent's failure chain until a node with a transition
            // on `symbol` is found. The chain terminates at the root.
            let mut fail = failure[parent as usize];
            while fail != ROOT && !nodes[fail as usize].transitions.contains_key(&symbol) {
                fail = failure[fail as usize];
            }

            failure[child as usize] = match nodes[fail as usize].transitions.get(&symbol) {
                // A node must never be its own failure target, otherwise the
                // matcher's failure-following loop would not terminate.
                Some(&target) if target != child => target,
                _ => ROOT,
            };

            queue.push_back(child);
        }
    }

    failure
}

/// List the builder nodes in breadth-first order, root first.
/// Children are visited in creation order to make the flattening
/// deterministic (hash map iteration order is not).
fn breadth_first_order<S: Symbol>(nodes: &[BuilderNode<S>]) -> Vec<u32> {
    let mut order = Vec::with_capacity(nodes.len());
    order.push(ROOT);

    let mut head = 0;
    while head < order.len() {
        let current = order[head] as usize;
        head += 1;

        let mut children: Vec<u32> = nodes[current].transitions.values().copied().collect();
        children.sort_unstable();
        order.extend(children);
    }

    debug_assert_eq!(order.len(), nodes.len());
    order
}

impl<S: Symbol, P: Clone> From<TrieBuilder<S, P>> for Automaton<'_, S, P> {
    fn from(builder: TrieBuilder<S, P>) -> Self {
        let TrieBuilder {
            nodes: builder_nodes,
            patterns,
        } = builder;

        let failure = resolve_failures(&builder_nodes);
        let order = breadth_first_order(&builder_nodes);

        // Renumber the nodes in breadth-first order. A failure target is
        // always shallower than the node pointing to it, so it gets a
        // smaller index and is flattened first.
        let mut new_index = vec![0u32; builder_nodes.len()];
        for (new, &old) in order.iter().enumerate() {
            new_index[old as usize] = new as u32;
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(builder_nodes.len());
        let mut edges = Vec::new();
        let mut outputs = Vec::new();

        for &old in &order {
            let builder_node = &builder_nodes[old as usize];

            // Flatten the transitions, sorted by symbol so the matcher can
            // binary-search them.
            let edge_start = edges.len() as u32;
            let mut node_edges: Vec<Edge<S>> = builder_node
                .transitions
                .iter()
                .map(|(&symbol, &target)| Edge {
                    symbol,
                    target: IndexNode::new(new_index[target as usize]),
                })
                .collect();
            node_edges.sort_unstable_by_key(|edge| edge.symbol);
            edges.extend(node_edges);

            // Close the output set under failure-following: the failure
            // target is already flattened, so its output range is already
            // the full closed set and a single union suffices.
            let output_start = outputs.len() as u32;
            outputs.extend(
                builder_node
                    .outputs
                    .iter()
                    .map(|&pattern_pos| IndexPattern::new(pattern_pos)),
            );

            let fail_new = new_index[failure[old as usize] as usize];
            if failure[old as usize] != old {
                let inherited = nodes[fail_new as usize].outputs.clone();
                for output_pos in *inherited.start..*inherited.end {
                    let inherited_pattern = outputs[output_pos as usize];
                    outputs.push(inherited_pattern);
                }
            }

            nodes.push(Node {
                failure: IndexNode::new(fail_new),
                edges: IndexEdge::new(edge_start)..IndexEdge::new(edges.len() as u32),
                outputs: IndexOutput::new(output_start)..IndexOutput::new(outputs.len() as u32),
            });
        }

        Automaton {
            nodes: Cow::Owned(nodes),
            edges: Cow::Owned(edges),
            outputs: Cow::Owned(outputs),
            patterns: Cow::Owned(patterns),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TrieBuilder;

    fn build(patterns: &[&str]) -> Automaton<'static, u8, u32> {
        let mut builder = TrieBuilder::new();
        for (id, pattern) in patterns.iter().enumerate() {
            builder.insert(pattern.as_bytes(), id as u32);
        }
        builder.compile()
    }

    /// Walk the trie transitions from the root, panicking if the prefix is
    /// not present.
    fn node_for(automaton: &Automaton<u8, u32>, prefix: &str) -> IndexNode {
        let mut node = IndexNode::ROOT;
        for symbol in prefix.bytes() {
            node = automaton
                .transition(node, symbol)
                .unwrap_or_else(|| panic!("prefix {:?} not in trie", prefix));
        }
        node
    }

    fn output_ids(automaton: &Automaton<u8, u32>, node: IndexNode) -> Vec<u32> {
        let range = automaton.node(node).outputs.clone();
        let mut ids: Vec<u32> = (*range.start..*range.end)
            .map(|pos| {
                let pattern = automaton.outputs()[pos as usize];
                automaton.patterns()[*pattern as usize].id
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn root_is_its_own_failure_target() {
        let automaton = build(&["he", "she"]);
        assert_eq!(automaton.failure(IndexNode::ROOT), IndexNode::ROOT);
    }

    #[test]
    fn failure_links_point_to_longest_proper_suffix() {
        let automaton = build(&["he", "she", "his", "hers"]);

        // "she" -> "he", the longest proper suffix that is also a prefix
        assert_eq!(
            automaton.failure(node_for(&automaton, "she")),
            node_for(&automaton, "he")
        );
        // "sh" -> "h"
        assert_eq!(
            automaton.failure(node_for(&automaton, "sh")),
            node_for(&automaton, "h")
        );
        // "his" -> "s" and "hers" -> "s"
        assert_eq!(
            automaton.failure(node_for(&automaton, "his")),
            node_for(&automaton, "s")
        );
        assert_eq!(
            automaton.failure(node_for(&automaton, "hers")),
            node_for(&automaton, "s")
        );
        // "her" has no suffix present in the trie, it falls back to the root
        assert_eq!(
            automaton.failure(node_for(&automaton, "her")),
            IndexNode::ROOT
        );
    }

    #[test]
    fn depth_one_nodes_fail_to_root() {
        let automaton = build(&["he", "she"]);
        assert_eq!(automaton.failure(node_for(&automaton, "h")), IndexNode::ROOT);
        assert_eq!(automaton.failure(node_for(&automaton, "s")), IndexNode::ROOT);
    }

    #[test]
    fn outputs_inherited_through_failure_links() {
        let automaton = build(&["he", "she", "his", "hers"]);

        // Standing on "she" also recognizes "he"
        assert_eq!(output_ids(&automaton, node_for(&automaton, "she")), vec![0, 1]);
        // "hers" inherits nothing: its failure chain ("s", root) holds no pattern
        assert_eq!(output_ids(&automaton, node_for(&automaton, "hers")), vec![3]);
        // Non-terminal nodes recognize nothing
        assert_eq!(output_ids(&automaton, node_for(&automaton, "her")), vec![]);
    }

    #[test]
    fn output_closure_is_complete() {
        // For every node, the failure target's outputs are a subset of the
        // node's outputs. Applied to the whole automaton this is equivalent
        // to closure under failure-chain walking.
        let automaton = build(&["a", "ab", "bab", "bc", "bca", "c", "caa"]);

        for index in 0..automaton.node_count() as u32 {
            let node = IndexNode::new(index);
            let own = output_ids(&automaton, node);
            let inherited = output_ids(&automaton, automaton.failure(node));
            assert!(
                inherited.iter().all(|id| own.contains(id)),
                "node {} is missing outputs of its failure target",
                index
            );
        }
    }

    #[test]
    fn failure_targets_are_flattened_first() {
        let automaton = build(&["he", "she", "his", "hers"]);

        for index in 1..automaton.node_count() as u32 {
            let node = IndexNode::new(index);
            assert!(*automaton.failure(node) < index);
        }
    }

    #[test]
    fn edges_are_sorted_by_symbol() {
        let automaton = build(&["he", "she", "his", "hers", "ha", "hz"]);

        for node in automaton.nodes() {
            let edges = &automaton.edges()[*node.edges.start as usize..*node.edges.end as usize];
            assert!(edges.windows(2).all(|pair| pair[0].symbol < pair[1].symbol));
        }
    }

    #[test]
    fn zero_patterns_compile_to_a_single_node() {
        let automaton = TrieBuilder::<u8, u32>::new().compile();

        assert_eq!(automaton.node_count(), 1);
        assert_eq!(automaton.pattern_count(), 0);
        assert_eq!(automaton.failure(IndexNode::ROOT), IndexNode::ROOT);
    }

    #[test]
    fn empty_pattern_propagates_to_every_node() {
        let mut builder = TrieBuilder::new();
        builder.insert(b"", 0u32);
        builder.insert(b"ab", 1);
        let automaton = builder.compile();

        // Every failure chain ends at the root, so the root's own output
        // (the empty pattern) is inherited everywhere.
        for index in 0..automaton.node_count() as u32 {
            let node = IndexNode::new(index);
            assert!(output_ids(&automaton, node).contains(&0));
        }
    }
}
