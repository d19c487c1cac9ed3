//! Define index wrappers that can only be used to access their corresponding array.
//! If instead an index was returned as an integer, it could be used with any of
//! the arrays in the automaton.
//! Here, the inner index integer is kept private so that a node index can never
//! be mistaken for an edge, output or pattern index.

use std::ops::Deref;

// Macro to implement an index wrapper for one automaton array
macro_rules! index_wrapper {
    ($index:ident) => {
        /// Represent a valid index in the [Automaton](crate::Automaton) corresponding array.
        #[derive(Debug, Copy, Clone, Eq, PartialEq)]
        pub struct $index {
            index: u32,
        }

        impl Deref for $index {
            type Target = u32;

            fn deref(&self) -> &Self::Target {
                &self.index
            }
        }

        impl $index {
            pub(super) const fn new(index: u32) -> Self {
                Self { index }
            }
        }
    };
}

index_wrapper!(IndexNode);
index_wrapper!(IndexEdge);
index_wrapper!(IndexOutput);
index_wrapper!(IndexPattern);

impl IndexNode {
    /// The root node, always flattened at the start of the node array.
    /// It is the unique fixed point of the failure links.
    pub(crate) const ROOT: Self = Self::new(0);
}
