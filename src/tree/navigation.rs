//! Bit-level tree index navigation
//!
//! A complete binary tree of height d+1 and its flat array share one index
//! space once the translation below is applied:
//!   forward(d, x)  = shift(d+1, x) - 1
//!   backward(d, y) = unshift(d+1, y + 1)
//! Both directions are built from `iterate_until` over shifts.
//!
//! Primitives whose orbit cannot terminate on a given input reject it with
//! `BitsError::Divergent` before looping.

use tracing::trace;

use crate::bits::{Bit, BitsError, InfiniteBits};
use crate::util::iterate_until;

fn divergent(operation: &'static str, value: &InfiniteBits) -> BitsError {
    trace!(operation, %value, "rejecting navigation input");
    BitsError::Divergent {
        operation,
        value: value.clone(),
    }
}

/// Set bit `depth`, then shift right until the value is odd.
pub fn shift_toward(depth: usize, bits: &InfiniteBits) -> InfiniteBits {
    iterate_until(
        InfiniteBits::is_even,
        InfiniteBits::shift_right,
        bits.set_bit(depth),
    )
}

/// Shift left until bit `depth` is set, then clear it.
///
/// Inverse of [`shift_toward`] on its image. Fails for zero and for values
/// whose lowest set bit sits above `depth`, since no left shift ever
/// reaches bit `depth` for those.
pub fn unshift_from(depth: usize, bits: &InfiniteBits) -> Result<InfiniteBits, BitsError> {
    match bits.trailing_zeros() {
        Some(lowest) if lowest <= depth => {}
        _ => return Err(divergent("unshift_from", bits)),
    }
    let aligned = iterate_until(
        |x: &InfiniteBits| !x.test_bit_at(depth),
        InfiniteBits::shift_left,
        bits.clone(),
    );
    Ok(aligned.clear_bit(depth))
}

/// Tree position to array position.
pub fn forward_translate(depth: usize, bits: &InfiniteBits) -> InfiniteBits {
    shift_toward(depth + 1, bits).decrement()
}

/// Array position to tree position; inverse of [`forward_translate`]
/// for `bits` in `[0, 2^(depth+1))`.
pub fn backward_translate(depth: usize, bits: &InfiniteBits) -> Result<InfiniteBits, BitsError> {
    unshift_from(depth + 1, &bits.increment()).map_err(|_| divergent("backward_translate", bits))
}

/// Nearest ancestor whose subtree is not yet folded into its sibling.
///
/// Shift right once, then keep shifting while odd. Fails for -1 and -2,
/// whose parent is the all-ones value.
pub fn active_parent(bits: &InfiniteBits) -> Result<InfiniteBits, BitsError> {
    let parent = bits.shift_right();
    if parent == InfiniteBits::MINUS_ONE {
        return Err(divergent("active_parent", bits));
    }
    Ok(iterate_until(
        InfiniteBits::is_odd,
        InfiniteBits::shift_right,
        parent,
    ))
}

/// Apply `f` at the lowest set bit, keeping the zero bits below it.
///
/// `f` receives the value from the lowest set bit outward (always odd);
/// the skipped zeros are re-appended to its result. Fails for zero.
pub fn at_lowest_set_bit<F>(bits: &InfiniteBits, f: F) -> Result<InfiniteBits, BitsError>
where
    F: FnOnce(&InfiniteBits) -> InfiniteBits,
{
    fn descend<F>(bits: &InfiniteBits, f: F) -> InfiniteBits
    where
        F: FnOnce(&InfiniteBits) -> InfiniteBits,
    {
        match bits.decompose() {
            (prefix, Bit::Zero) => InfiniteBits::make(descend(&prefix, f), Bit::Zero),
            (_, Bit::One) => f(bits),
        }
    }

    if *bits == InfiniteBits::ZERO {
        return Err(divergent("at_lowest_set_bit", bits));
    }
    Ok(descend(bits, f))
}

/// `x + lsb(x)`: the next Fenwick cell covering `x`.
pub fn add_lowest_set_bit(bits: &InfiniteBits) -> Result<InfiniteBits, BitsError> {
    at_lowest_set_bit(bits, InfiniteBits::increment)
}

/// `x - lsb(x)`: the Fenwick cell just before the segment ending at `x`.
pub fn clear_lowest_set_bit(bits: &InfiniteBits) -> Result<InfiniteBits, BitsError> {
    at_lowest_set_bit(bits, InfiniteBits::decrement)
}

/// Shift right while even, then decrement. Fails for zero.
pub fn previous_segment(bits: &InfiniteBits) -> Result<InfiniteBits, BitsError> {
    if *bits == InfiniteBits::ZERO {
        return Err(divergent("previous_segment", bits));
    }
    Ok(iterate_until(InfiniteBits::is_even, InfiniteBits::shift_right, bits.clone()).decrement())
}
