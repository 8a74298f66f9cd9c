//! Segment and Fenwick trees against a naive array model

use fenwick_bits::tree::{add_lowest_set_bit, clear_lowest_set_bit};
use fenwick_bits::{FenwickTree, InfiniteBits, SegmentTree};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(usize, i64),
    Set(usize, i64),
}

fn ops(len: usize) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0..len, -100i64..100).prop_map(|(i, d)| Op::Add(i, d)),
        (0..len, -100i64..100).prop_map(|(i, v)| Op::Set(i, v)),
    ];
    proptest::collection::vec(op, 0..40)
}

proptest! {
    #[test]
    fn trees_match_naive_sums(
        (values, script) in (1usize..40).prop_flat_map(|len| {
            (proptest::collection::vec(-50i64..50, len), ops(len))
        }),
        offset in -20i64..20,
    ) {
        let mut naive = values.clone();
        let mut segment = SegmentTree::from_values(offset, &values).unwrap();
        let mut fenwick = FenwickTree::from_values(&values);

        for op in &script {
            match *op {
                Op::Add(i, delta) => {
                    naive[i] += delta;
                    segment.update(offset + i as i64, delta).unwrap();
                    fenwick.update(i + 1, delta).unwrap();
                }
                Op::Set(i, value) => {
                    naive[i] = value;
                    segment.set(offset + i as i64, value).unwrap();
                    fenwick.set(i + 1, value).unwrap();
                }
            }
        }

        let len = naive.len();
        for lo in 0..len {
            for hi in lo..len {
                let expected: i64 = naive[lo..=hi].iter().sum();
                prop_assert_eq!(segment.range_query(offset + lo as i64, offset + hi as i64), expected);
                prop_assert_eq!(fenwick.range_sum(lo + 1, hi + 1).unwrap(), expected);
            }
            prop_assert_eq!(fenwick.get(lo + 1).unwrap(), naive[lo]);
        }
        prop_assert_eq!(segment.total(), naive.iter().sum::<i64>());
    }
}

#[test]
fn fenwick_paths_follow_lowest_set_bit_edits() {
    let len = 64usize;
    let fenwick = FenwickTree::new(len);

    for index in 1..=len {
        let mut up = Vec::new();
        let mut cur = InfiniteBits::from_integer(index as i64);
        while cur.to_integer().unwrap() <= len as i64 {
            up.push(cur.to_integer().unwrap() as usize);
            cur = add_lowest_set_bit(&cur).unwrap();
        }
        assert_eq!(up, fenwick.update_path(index).collect::<Vec<_>>());

        let mut down = Vec::new();
        let mut cur = InfiniteBits::from_integer(index as i64);
        while cur != InfiniteBits::ZERO {
            down.push(cur.to_integer().unwrap() as usize);
            cur = clear_lowest_set_bit(&cur).unwrap();
        }
        assert_eq!(down, fenwick.query_path(index).collect::<Vec<_>>());
    }
}

#[test]
fn fenwick_cell_covers_lowest_set_bit_segment() {
    // Cell i holds the sum over (i - lsb(i), i]
    let values: Vec<i64> = (1..=16).collect();
    let mut fenwick = FenwickTree::new(values.len());
    for (offset, &value) in values.iter().enumerate() {
        fenwick.update(offset + 1, value).unwrap();
    }

    for index in 1..=values.len() {
        let bits = InfiniteBits::from_integer(index as i64);
        let start = clear_lowest_set_bit(&bits).unwrap().to_integer().unwrap() as usize;
        let width = bits.lowest_set_bit().to_integer().unwrap() as usize;
        assert_eq!(index - start, width);

        let expected: i64 = values[start..index].iter().sum();
        assert_eq!(
            fenwick.prefix_sum(index).unwrap() - fenwick.prefix_sum(start).unwrap(),
            expected
        );
    }
}
