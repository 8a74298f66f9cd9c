//! Closed integer interval covered by a segment tree node
//!
//! Node = interval [left, right]
//! Children computed via midpoint: m = ⌊(left + right) / 2⌋
//!   Left child: [left, m]
//!   Right child: [m+1, right]

use std::fmt;

/// Tree node span (implicit - just an interval)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeNode {
    /// Lowest covered index (inclusive)
    pub left: i64,

    /// Highest covered index (inclusive)
    pub right: i64,
}

impl TreeNode {
    /// Span [left, right]; callers guarantee `left <= right`
    pub fn span(left: i64, right: i64) -> Self {
        debug_assert!(left <= right, "empty span [{}, {}]", left, right);
        Self { left, right }
    }

    /// Check if leaf (unit interval)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left == self.right
    }

    /// Number of covered indices
    #[inline]
    pub fn length(&self) -> u64 {
        self.right.abs_diff(self.left).saturating_add(1)
    }

    /// Whether `index` lies inside the span
    #[inline]
    pub fn contains(&self, index: i64) -> bool {
        self.left <= index && index <= self.right
    }

    /// Whether the span lies entirely inside [lo, hi]
    #[inline]
    pub fn within(&self, lo: i64, hi: i64) -> bool {
        lo <= self.left && self.right <= hi
    }

    /// Whether the span and [lo, hi] share no index
    #[inline]
    pub fn disjoint(&self, lo: i64, hi: i64) -> bool {
        hi < self.left || self.right < lo
    }

    /// Midpoint for the split, rounded toward `left`
    #[inline]
    pub fn midpoint(&self) -> i64 {
        self.left + (self.right.abs_diff(self.left) / 2) as i64
    }

    /// Get children via midpoint split
    ///
    /// Returns: ([left, mid], [mid+1, right])
    pub fn children(&self) -> (TreeNode, TreeNode) {
        debug_assert!(!self.is_leaf(), "Leaf has no children");

        let mid = self.midpoint();
        let left_child = TreeNode {
            left: self.left,
            right: mid,
        };
        let right_child = TreeNode {
            left: mid + 1,
            right: self.right,
        };

        (left_child, right_child)
    }

    /// Levels below this node along the longest (left) path
    pub fn depth_to_leaf(&self) -> usize {
        let mut node = *self;
        let mut depth = 0;

        while !node.is_leaf() {
            let (left_child, _) = node.children();
            node = left_child;
            depth += 1;
        }

        depth
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "[{}]", self.left)
        } else {
            write!(f, "[{}, {}]", self.left, self.right)
        }
    }
}
