//! Index navigation and the trees it describes
//!
//! Two layouts of the same prefix-sum tree:
//!   SegmentTree  explicit nodes over a closed interval, split at midpoints
//!   FenwickTree  the left children only, packed into a flat array
//!
//! `navigation` derives the index arithmetic that moves between the two,
//! on `InfiniteBits`. The trees themselves work on plain integers.

mod fenwick;
pub mod navigation;
mod node;
mod segment;

pub use fenwick::{query_path, update_path, FenwickTree};
pub use navigation::{
    active_parent, add_lowest_set_bit, at_lowest_set_bit, backward_translate,
    clear_lowest_set_bit, forward_translate, previous_segment, shift_toward, unshift_from,
};
pub use node::TreeNode;
pub use segment::SegmentTree;

use thiserror::Error;

/// Errors from building or addressing a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Interval with no indices
    #[error("interval [{left}, {right}] is empty")]
    EmptyInterval {
        /// Requested lower bound
        left: i64,
        /// Requested upper bound
        right: i64,
    },

    /// Values starting at `start` run past `i64::MAX`
    #[error("{len} values starting at {start} overflow the index range")]
    SpanOverflow {
        /// Requested first index
        start: i64,
        /// Number of values
        len: usize,
    },

    /// Index outside the tree
    #[error("index {index} outside [{left}, {right}]")]
    IndexOutOfRange {
        /// Offending index
        index: i64,
        /// Lowest valid index
        left: i64,
        /// Highest valid index
        right: i64,
    },
}
