//! Array-backed Fenwick (binary indexed) tree
//!
//! Cell i (1-indexed) holds the sum of the segment (i - lsb(i), i].
//!   update climbs:   i -> i + lsb(i)
//!   query descends:  i -> i - lsb(i)
//! These are the integer forms of `add_lowest_set_bit` and
//! `clear_lowest_set_bit` in the navigation module.

use std::iter;

use tracing::debug;

use super::TreeError;

#[inline]
fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// Cells an update at `index` rewrites in a tree of `len` positions,
/// lowest first. Empty when `index` is outside `1..=len`.
pub fn update_path(index: usize, len: usize) -> impl Iterator<Item = usize> {
    let start = (1..=len).contains(&index).then_some(index);
    iter::successors(start, move |&i| {
        i.checked_add(lsb(i)).filter(|&next| next <= len)
    })
}

/// Cells a prefix query ending at `index` reads, highest first.
pub fn query_path(index: usize, len: usize) -> impl Iterator<Item = usize> {
    let start = (1..=len).contains(&index).then_some(index);
    iter::successors(start, |&i| Some(i - lsb(i)).filter(|&next| next > 0))
}

/// Prefix-sum tree over positions `1..=len`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenwickTree {
    /// Slot 0 is unused so positions index directly.
    cells: Vec<i64>,
}

impl FenwickTree {
    /// All-zero tree with `len` positions.
    pub fn new(len: usize) -> Self {
        debug!(len, "building zeroed Fenwick tree");
        Self {
            cells: vec![0; len + 1],
        }
    }

    /// Tree holding `values` at positions `1..=values.len()`, built in O(n).
    pub fn from_values(values: &[i64]) -> Self {
        let len = values.len();
        debug!(len, "building Fenwick tree from values");

        let mut cells = Vec::with_capacity(len + 1);
        cells.push(0);
        cells.extend_from_slice(values);
        for i in 1..=len {
            let parent = i + lsb(i);
            if parent <= len {
                cells[parent] += cells[i];
            }
        }
        Self { cells }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// True when there are no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add `delta` at `index`.
    pub fn update(&mut self, index: usize, delta: i64) -> Result<(), TreeError> {
        self.check(index)?;
        for i in update_path(index, self.len()) {
            self.cells[i] += delta;
        }
        Ok(())
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: usize, value: i64) -> Result<(), TreeError> {
        let current = self.get(index)?;
        self.update(index, value - current)
    }

    /// Sum of positions `1..=index`; `index == 0` is the empty prefix.
    pub fn prefix_sum(&self, index: usize) -> Result<i64, TreeError> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        Ok(query_path(index, self.len()).map(|i| self.cells[i]).sum())
    }

    /// Sum of positions `lo..=hi`; `lo > hi` is empty.
    pub fn range_sum(&self, lo: usize, hi: usize) -> Result<i64, TreeError> {
        if lo > hi {
            return Ok(0);
        }
        self.check(lo)?;
        self.check(hi)?;
        Ok(self.prefix_sum(hi)? - self.prefix_sum(lo - 1)?)
    }

    /// Value stored at `index`.
    pub fn get(&self, index: usize) -> Result<i64, TreeError> {
        self.range_sum(index, index)
    }

    /// Positions an update at `index` touches, lowest first.
    pub fn update_path(&self, index: usize) -> impl Iterator<Item = usize> {
        update_path(index, self.len())
    }

    /// Positions a prefix query at `index` reads, highest first.
    pub fn query_path(&self, index: usize) -> impl Iterator<Item = usize> {
        query_path(index, self.len())
    }

    fn check(&self, index: usize) -> Result<(), TreeError> {
        if (1..=self.len()).contains(&index) {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> TreeError {
        TreeError::IndexOutOfRange {
            index: index as i64,
            left: 1,
            right: self.len() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_prefix() {
        let mut tree = FenwickTree::new(8);
        tree.update(2, 1).unwrap();
        assert_eq!(tree.prefix_sum(1).unwrap(), 0);
        assert_eq!(tree.prefix_sum(2).unwrap(), 1);
        assert_eq!(tree.prefix_sum(3).unwrap(), 1);

        tree.update(5, 2).unwrap();
        assert_eq!(tree.prefix_sum(4).unwrap(), 1);
        assert_eq!(tree.prefix_sum(5).unwrap(), 3);
        assert_eq!(tree.prefix_sum(8).unwrap(), 3);
        assert_eq!(tree.prefix_sum(0).unwrap(), 0);
    }

    #[test]
    fn test_linear_build_matches_updates() {
        let values = [3, -1, 4, 1, -5, 9, 2, 6, 5];
        let built = FenwickTree::from_values(&values);

        let mut stepped = FenwickTree::new(values.len());
        for (offset, &value) in values.iter().enumerate() {
            stepped.update(offset + 1, value).unwrap();
        }
        assert_eq!(built, stepped);
    }

    #[test]
    fn test_range_get_set() {
        let mut tree = FenwickTree::from_values(&[1, 2, 3, 4, 5]);
        assert_eq!(tree.range_sum(2, 4).unwrap(), 9);
        assert_eq!(tree.range_sum(4, 2).unwrap(), 0);
        assert_eq!(tree.get(5).unwrap(), 5);

        tree.set(3, 10).unwrap();
        assert_eq!(tree.get(3).unwrap(), 10);
        assert_eq!(tree.prefix_sum(5).unwrap(), 22);
    }

    #[test]
    fn test_paths() {
        let tree = FenwickTree::new(8);
        assert_eq!(tree.update_path(3).collect::<Vec<_>>(), vec![3, 4, 8]);
        assert_eq!(tree.update_path(5).collect::<Vec<_>>(), vec![5, 6, 8]);
        assert_eq!(tree.query_path(7).collect::<Vec<_>>(), vec![7, 6, 4]);
        assert_eq!(tree.query_path(8).collect::<Vec<_>>(), vec![8]);
        assert_eq!(tree.update_path(0).count(), 0);
        assert_eq!(tree.update_path(9).count(), 0);
    }

    #[test]
    fn test_paths_without_cells() {
        assert_eq!(update_path(3, 8).collect::<Vec<_>>(), vec![3, 4, 8]);
        assert_eq!(query_path(7, 8).collect::<Vec<_>>(), vec![7, 6, 4]);

        let len = 1usize << 40;
        assert_eq!(update_path(3, len).count(), 40);
        assert_eq!(update_path(len, len).collect::<Vec<_>>(), vec![len]);
        assert_eq!(query_path(len - 1, len).count(), 40);

        // i + lsb(i) past usize::MAX ends the climb
        let top = 1usize << (usize::BITS - 1);
        assert_eq!(update_path(top, usize::MAX).collect::<Vec<_>>(), vec![top]);
    }

    #[test]
    fn test_out_of_range() {
        let mut tree = FenwickTree::new(4);
        assert_eq!(
            tree.update(0, 1).unwrap_err(),
            TreeError::IndexOutOfRange {
                index: 0,
                left: 1,
                right: 4
            }
        );
        assert!(tree.update(5, 1).is_err());
        assert!(tree.prefix_sum(5).is_err());
        assert!(FenwickTree::new(0).is_empty());
    }
}
