//! Range-sum segment tree over a static closed interval
//!
//! Every node caches the sum of its span; point updates touch one
//! root-to-leaf path and range queries split at most twice per level.

use tracing::debug;

use super::{TreeError, TreeNode};

#[derive(Debug, Clone)]
enum SegmentNode {
    Leaf {
        index: i64,
        value: i64,
    },
    Branch {
        span: TreeNode,
        sum: i64,
        left: Box<SegmentNode>,
        right: Box<SegmentNode>,
    },
}

impl SegmentNode {
    fn build(span: TreeNode, value_at: &dyn Fn(i64) -> i64) -> Self {
        if span.is_leaf() {
            return SegmentNode::Leaf {
                index: span.left,
                value: value_at(span.left),
            };
        }

        let (left_span, right_span) = span.children();
        let left = Box::new(Self::build(left_span, value_at));
        let right = Box::new(Self::build(right_span, value_at));
        SegmentNode::Branch {
            span,
            sum: left.sum() + right.sum(),
            left,
            right,
        }
    }

    fn span(&self) -> TreeNode {
        match self {
            SegmentNode::Leaf { index, .. } => TreeNode::span(*index, *index),
            SegmentNode::Branch { span, .. } => *span,
        }
    }

    fn sum(&self) -> i64 {
        match self {
            SegmentNode::Leaf { value, .. } => *value,
            SegmentNode::Branch { sum, .. } => *sum,
        }
    }

    /// `index` must lie inside this node's span.
    fn add(&mut self, index: i64, delta: i64) {
        match self {
            SegmentNode::Leaf { value, .. } => *value += delta,
            SegmentNode::Branch {
                sum, left, right, ..
            } => {
                *sum += delta;
                if index <= left.span().right {
                    left.add(index, delta);
                } else {
                    right.add(index, delta);
                }
            }
        }
    }

    fn query(&self, lo: i64, hi: i64) -> i64 {
        let span = self.span();
        if span.disjoint(lo, hi) {
            return 0;
        }
        if span.within(lo, hi) {
            return self.sum();
        }
        match self {
            // A unit span is always disjoint or within
            SegmentNode::Leaf { .. } => 0,
            SegmentNode::Branch { left, right, .. } => left.query(lo, hi) + right.query(lo, hi),
        }
    }
}

/// Range-sum tree keyed by the closed interval `[left, right]`
#[derive(Debug, Clone)]
pub struct SegmentTree {
    root: SegmentNode,
}

impl SegmentTree {
    /// All-zero tree over `[left, right]`.
    pub fn new(left: i64, right: i64) -> Result<Self, TreeError> {
        if left > right {
            return Err(TreeError::EmptyInterval { left, right });
        }
        let span = TreeNode::span(left, right);
        debug!(%span, "building zeroed segment tree");
        Ok(Self {
            root: SegmentNode::build(span, &|_: i64| 0),
        })
    }

    /// Tree over `[start, start + values.len() - 1]` holding `values`.
    pub fn from_values(start: i64, values: &[i64]) -> Result<Self, TreeError> {
        if values.is_empty() {
            return Err(TreeError::EmptyInterval {
                left: start,
                right: start.saturating_sub(1),
            });
        }
        let right = i64::try_from(values.len() - 1)
            .ok()
            .and_then(|last| start.checked_add(last))
            .ok_or(TreeError::SpanOverflow {
                start,
                len: values.len(),
            })?;
        let span = TreeNode::span(start, right);
        debug!(%span, "building segment tree from values");
        Ok(Self {
            root: SegmentNode::build(span, &|index: i64| values[(index - start) as usize]),
        })
    }

    /// Interval covered by the tree.
    pub fn span(&self) -> TreeNode {
        self.root.span()
    }

    /// Levels between the root and the deepest leaf.
    pub fn height(&self) -> usize {
        self.span().depth_to_leaf()
    }

    /// Sum over the whole interval.
    pub fn total(&self) -> i64 {
        self.root.sum()
    }

    /// Add `delta` at `index`.
    pub fn update(&mut self, index: i64, delta: i64) -> Result<(), TreeError> {
        self.check(index)?;
        self.root.add(index, delta);
        Ok(())
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: i64, value: i64) -> Result<(), TreeError> {
        let current = self.get(index)?;
        self.root.add(index, value - current);
        Ok(())
    }

    /// Value stored at `index`.
    pub fn get(&self, index: i64) -> Result<i64, TreeError> {
        self.check(index)?;
        Ok(self.root.query(index, index))
    }

    /// Sum over `[lo, hi]` clipped to the tree span; empty ranges sum to 0.
    pub fn range_query(&self, lo: i64, hi: i64) -> i64 {
        if lo > hi {
            return 0;
        }
        self.root.query(lo, hi)
    }

    fn check(&self, index: i64) -> Result<(), TreeError> {
        let span = self.span();
        if span.contains(index) {
            Ok(())
        } else {
            Err(TreeError::IndexOutOfRange {
                index,
                left: span.left,
                right: span.right,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_update_and_range_query() {
        let mut tree = SegmentTree::new(1, 8).unwrap();
        tree.update(3, 5).unwrap();
        tree.update(6, 2).unwrap();
        tree.update(3, 1).unwrap();

        assert_eq!(tree.range_query(1, 8), 8);
        assert_eq!(tree.range_query(3, 3), 6);
        assert_eq!(tree.range_query(4, 8), 2);
        assert_eq!(tree.range_query(1, 2), 0);
        assert_eq!(tree.total(), 8);
    }

    #[test]
    fn test_query_is_clipped() {
        let tree = SegmentTree::from_values(10, &[1, 2, 3, 4]).unwrap();
        assert_eq!(tree.span(), TreeNode::span(10, 13));
        assert_eq!(tree.range_query(-100, 100), 10);
        assert_eq!(tree.range_query(12, 100), 7);
        assert_eq!(tree.range_query(20, 30), 0);
        assert_eq!(tree.range_query(12, 11), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut tree = SegmentTree::from_values(-2, &[4, 4, 4]).unwrap();
        tree.set(-1, 10).unwrap();
        assert_eq!(tree.get(-1).unwrap(), 10);
        assert_eq!(tree.total(), 18);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            SegmentTree::new(5, 4).unwrap_err(),
            TreeError::EmptyInterval { left: 5, right: 4 }
        );
        assert!(SegmentTree::from_values(0, &[]).is_err());

        let mut tree = SegmentTree::new(0, 3).unwrap();
        assert_eq!(
            tree.update(4, 1).unwrap_err(),
            TreeError::IndexOutOfRange {
                index: 4,
                left: 0,
                right: 3
            }
        );
    }

    #[test]
    fn test_span_at_top_of_range() {
        let tree = SegmentTree::from_values(i64::MAX, &[7]).unwrap();
        assert_eq!(tree.span(), TreeNode::span(i64::MAX, i64::MAX));
        assert_eq!(tree.get(i64::MAX).unwrap(), 7);

        let tree = SegmentTree::from_values(i64::MAX - 2, &[1, 2, 3]).unwrap();
        assert_eq!(tree.range_query(i64::MAX - 1, i64::MAX), 5);

        assert_eq!(
            SegmentTree::from_values(i64::MAX, &[1, 2]).unwrap_err(),
            TreeError::SpanOverflow {
                start: i64::MAX,
                len: 2
            }
        );
    }

    #[test]
    fn test_span_at_bottom_of_range() {
        let mut tree = SegmentTree::from_values(i64::MIN, &[3, 4, 5]).unwrap();
        tree.update(i64::MIN + 2, 1).unwrap();
        assert_eq!(tree.range_query(i64::MIN, i64::MIN + 1), 7);
        assert_eq!(tree.range_query(i64::MIN + 1, i64::MAX), 10);
        assert_eq!(tree.total(), 13);
    }

    #[test]
    fn test_height_is_logarithmic() {
        for len in [1i64, 2, 7, 64, 1000] {
            let tree = SegmentTree::new(1, len).unwrap();
            let bound = (len as f64).log2().ceil() as usize;
            assert!(tree.height() <= bound, "height {} > {}", tree.height(), bound);
        }
    }
}
