//! # Infinite bit strings for tree index navigation
//!
//! This library implements a small algebra over two's-complement bit strings
//! of unbounded width, and uses it to derive the index arithmetic shared by
//! segment trees and Fenwick trees.
//!
//! ## Core Components
//!
//! 1. **Bit strings**: `InfiniteBits` stores the finite prefix that differs
//!    from an eventually-constant tail; normalization keeps it unique
//! 2. **Arithmetic**: ripple-carry increment/decrement/addition, negation,
//!    bitwise AND/OR/NOT, bit-indexed reads and writes, shifts
//! 3. **Navigation**: shift/unshift, tree-to-array translation, active
//!    parent, previous segment, all built on `iterate_until`
//! 4. **Trees**: a range-sum `SegmentTree` and an array `FenwickTree`
//!
//! ## Usage Example
//!
//! ```
//! use fenwick_bits::{InfiniteBits, tree};
//!
//! let x = InfiniteBits::from_integer(26);
//! assert_eq!(x.lowest_set_bit().to_integer().unwrap(), 2);
//! assert_eq!(x.to_string(), "...00011010");
//!
//! let next = tree::add_lowest_set_bit(&x).unwrap();
//! assert_eq!(next.to_integer().unwrap(), 28);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod bits; // Bit and InfiniteBits
pub mod tree; // Navigation primitives, segment and Fenwick trees
pub mod util; // iterate_until

// Re-exports for convenience
pub use bits::{bit_index, Bit, BitsError, InfiniteBits, DISPLAY_TAIL_REPEAT};
pub use tree::{FenwickTree, SegmentTree, TreeError, TreeNode};
pub use util::iterate_until;
