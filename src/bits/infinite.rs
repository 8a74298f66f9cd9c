//! Normalized recursive bit strings
//!
//! Representation:
//!   Repeating(b)         ...bbbb       (0 or -1)
//!   Extended(prefix, b)  prefix ++ b   (b is the new least significant bit)
//!
//! Invariant: Extended(Repeating(b), b) is never stored. `make` is the only
//! place that appends a bit, so every integer has exactly one representation
//! and structural equality coincides with numeric equality.

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Neg, Not, Sub};
use std::sync::Arc;

use bitvec::prelude::*;

use super::{Bit, BitsError};

/// Copies of the tail bit printed after the `...` marker.
pub const DISPLAY_TAIL_REPEAT: usize = 3;

/// Signed integer as an eventually-constant two's-complement bit string
///
/// Values are immutable; prefixes are shared through `Arc`, so cloning is
/// O(1) and values can be handed across threads.
///
/// Conversion, indexing, rendering and drop walk the prefix iteratively.
/// Arithmetic, bitwise operations, equality and hashing recurse once per
/// stored bit, so their stack depth grows with `prefix_len`. Values in the
/// `i64` range store at most 63 bits; a long run of `shift_left` (or a write
/// to a very high bit followed by arithmetic) builds deeper prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfiniteBits(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Repeating(Bit),
    Extended(Arc<InfiniteBits>, Bit),
}

impl InfiniteBits {
    /// ...000
    pub const ZERO: InfiniteBits = InfiniteBits(Repr::Repeating(Bit::Zero));

    /// ...111
    pub const MINUS_ONE: InfiniteBits = InfiniteBits(Repr::Repeating(Bit::One));

    /// Infinite run of `bit`.
    pub const fn repeating(bit: Bit) -> Self {
        InfiniteBits(Repr::Repeating(bit))
    }

    /// Append `bit` below `prefix`, collapsing a redundant tail.
    pub fn make(prefix: InfiniteBits, bit: Bit) -> Self {
        if prefix.0 == Repr::Repeating(bit) {
            return prefix;
        }
        InfiniteBits(Repr::Extended(Arc::new(prefix), bit))
    }

    /// Split into `(prefix, least significant bit)`.
    ///
    /// A repeating value splits into itself and its tail bit.
    pub fn decompose(&self) -> (InfiniteBits, Bit) {
        match &self.0 {
            Repr::Repeating(bit) => (self.clone(), *bit),
            Repr::Extended(prefix, bit) => ((**prefix).clone(), *bit),
        }
    }

    /// Tail bit if this value is a bare repeating leaf (0 or -1).
    pub fn repeating_bit(&self) -> Option<Bit> {
        match self.0 {
            Repr::Repeating(bit) => Some(bit),
            Repr::Extended(..) => None,
        }
    }

    /// Bit repeated forever above the stored prefix (the sign).
    pub fn tail_bit(&self) -> Bit {
        let mut cur = self;
        loop {
            match &cur.0 {
                Repr::Repeating(bit) => return *bit,
                Repr::Extended(prefix, _) => cur = &**prefix,
            }
        }
    }

    /// Number of stored bits above the tail.
    pub fn prefix_len(&self) -> usize {
        let mut cur = self;
        let mut len = 0;
        while let Repr::Extended(prefix, _) = &cur.0 {
            len += 1;
            cur = &**prefix;
        }
        len
    }

    /// Encode a host integer.
    pub fn from_integer(n: i64) -> Self {
        match n {
            0 => Self::ZERO,
            -1 => Self::MINUS_ONE,
            _ => Self::make(Self::from_integer(n.div_euclid(2)), Bit::of_parity(n)),
        }
    }

    /// Decode into a host integer.
    pub fn to_integer(&self) -> Result<i64, BitsError> {
        let (prefix, tail) = self.to_bitvec();
        prefix
            .iter()
            .rev()
            .try_fold(-tail.value(), |acc, bit| {
                acc.checked_mul(2)?.checked_add(i64::from(*bit))
            })
            .ok_or_else(|| BitsError::Overflow(self.clone()))
    }

    /// Add one, rippling the carry through trailing ones.
    pub fn increment(&self) -> Self {
        if self.0 == Repr::Repeating(Bit::One) {
            return Self::ZERO;
        }
        match self.decompose() {
            (prefix, Bit::Zero) => Self::make(prefix, Bit::One),
            (prefix, Bit::One) => Self::make(prefix.increment(), Bit::Zero),
        }
    }

    /// Subtract one, rippling the borrow through trailing zeros.
    pub fn decrement(&self) -> Self {
        if self.0 == Repr::Repeating(Bit::Zero) {
            return Self::MINUS_ONE;
        }
        match self.decompose() {
            (prefix, Bit::One) => Self::make(prefix, Bit::Zero),
            (prefix, Bit::Zero) => Self::make(prefix.decrement(), Bit::One),
        }
    }

    fn sum(&self, other: &InfiniteBits) -> Self {
        match (&self.0, &other.0) {
            (_, Repr::Repeating(Bit::Zero)) => self.clone(),
            (Repr::Repeating(Bit::Zero), _) => other.clone(),
            (Repr::Repeating(Bit::One), Repr::Repeating(Bit::One)) => {
                Self::make(Self::MINUS_ONE, Bit::Zero)
            }
            _ => {
                let (xs, x) = self.decompose();
                let (ys, y) = other.decompose();
                if x.is_one() && y.is_one() {
                    Self::make(xs.sum(&ys).increment(), Bit::Zero)
                } else {
                    Self::make(xs.sum(&ys), x | y)
                }
            }
        }
    }

    /// Two's-complement negation: flip every bit, then add one.
    pub fn negate(&self) -> Self {
        self.bitwise_not().increment()
    }

    /// Bitwise AND over the full infinite width.
    pub fn bitwise_and(&self, other: &InfiniteBits) -> Self {
        match (&self.0, &other.0) {
            (Repr::Repeating(a), Repr::Repeating(b)) => Self::repeating(*a & *b),
            _ => {
                let (xs, x) = self.decompose();
                let (ys, y) = other.decompose();
                Self::make(xs.bitwise_and(&ys), x & y)
            }
        }
    }

    /// Bitwise OR over the full infinite width.
    pub fn bitwise_or(&self, other: &InfiniteBits) -> Self {
        match (&self.0, &other.0) {
            (Repr::Repeating(a), Repr::Repeating(b)) => Self::repeating(*a | *b),
            _ => {
                let (xs, x) = self.decompose();
                let (ys, y) = other.decompose();
                Self::make(xs.bitwise_or(&ys), x | y)
            }
        }
    }

    /// Flip every bit, tail included (`!x == -x - 1`).
    pub fn bitwise_not(&self) -> Self {
        match &self.0 {
            Repr::Repeating(bit) => Self::repeating(!*bit),
            Repr::Extended(prefix, bit) => Self::make(prefix.bitwise_not(), !*bit),
        }
    }

    /// Isolate the lowest set bit (`x & -x`); zero stays zero.
    pub fn lowest_set_bit(&self) -> Self {
        if self.0 == Repr::Repeating(Bit::Zero) {
            return Self::ZERO;
        }
        match self.decompose() {
            (prefix, Bit::Zero) => Self::make(prefix.lowest_set_bit(), Bit::Zero),
            (_, Bit::One) => Self::make(Self::ZERO, Bit::One),
        }
    }

    /// Position of the lowest set bit, `None` for zero.
    pub fn trailing_zeros(&self) -> Option<usize> {
        let mut cur = self;
        let mut count = 0;
        loop {
            match &cur.0 {
                Repr::Repeating(Bit::Zero) => return None,
                Repr::Repeating(Bit::One) | Repr::Extended(_, Bit::One) => return Some(count),
                Repr::Extended(prefix, Bit::Zero) => {
                    count += 1;
                    cur = &**prefix;
                }
            }
        }
    }

    /// Rewrite bit `idx` (0 = least significant).
    ///
    /// Bits above `idx` stay shared with `self`; the `idx` bits below are
    /// collected and re-appended.
    pub fn set_bit_at(&self, idx: usize, bit: Bit) -> Self {
        if self.test_bit_at(idx) == bit.is_one() {
            return self.clone();
        }
        let mut low = BitVec::<usize, Lsb0>::with_capacity(idx);
        let mut cur = self.clone();
        for _ in 0..idx {
            let (prefix, b) = cur.decompose();
            low.push(b.is_one());
            cur = prefix;
        }
        let top = Self::make(cur.shift_right(), bit);
        low.iter()
            .rev()
            .fold(top, |acc, b| Self::make(acc, Bit::from(*b)))
    }

    /// Force bit `idx` to one.
    pub fn set_bit(&self, idx: usize) -> Self {
        self.set_bit_at(idx, Bit::One)
    }

    /// Force bit `idx` to zero.
    pub fn clear_bit(&self, idx: usize) -> Self {
        self.set_bit_at(idx, Bit::Zero)
    }

    /// Read bit `idx` (0 = least significant).
    pub fn test_bit_at(&self, idx: usize) -> bool {
        let mut cur = self;
        let mut depth = idx;
        loop {
            match &cur.0 {
                Repr::Repeating(bit) => return bit.is_one(),
                Repr::Extended(_, bit) if depth == 0 => return bit.is_one(),
                Repr::Extended(prefix, _) => {
                    depth -= 1;
                    cur = &**prefix;
                }
            }
        }
    }

    /// Low bit is one.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.test_bit_at(0)
    }

    /// Low bit is zero.
    #[inline]
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Drop the low bit (floor division by two).
    pub fn shift_right(&self) -> Self {
        self.decompose().0
    }

    /// Append a zero low bit (multiplication by two).
    pub fn shift_left(&self) -> Self {
        Self::make(self.clone(), Bit::Zero)
    }

    /// Finite prefix, least significant bit first, plus the tail bit.
    pub fn to_bitvec(&self) -> (BitVec, Bit) {
        let mut prefix = BitVec::with_capacity(self.prefix_len());
        let mut cur = self;
        loop {
            match &cur.0 {
                Repr::Repeating(tail) => return (prefix, *tail),
                Repr::Extended(rest, bit) => {
                    prefix.push(bit.is_one());
                    cur = &**rest;
                }
            }
        }
    }

    /// Rebuild from a least-significant-first prefix and a tail bit.
    ///
    /// Redundant high bits equal to `tail` are absorbed by normalization.
    pub fn from_bitslice(bits: &BitSlice, tail: Bit) -> Self {
        bits.iter()
            .rev()
            .fold(Self::repeating(tail), |acc, bit| Self::make(acc, Bit::from(*bit)))
    }
}

impl Drop for InfiniteBits {
    // Unlink the prefix chain one uniquely owned layer at a time.
    fn drop(&mut self) {
        let mut next = match std::mem::replace(&mut self.0, Repr::Repeating(Bit::Zero)) {
            Repr::Extended(prefix, _) => prefix,
            Repr::Repeating(_) => return,
        };
        while let Some(mut layer) = Arc::into_inner(next) {
            match std::mem::replace(&mut layer.0, Repr::Repeating(Bit::Zero)) {
                Repr::Extended(prefix, _) => next = prefix,
                Repr::Repeating(_) => return,
            }
        }
    }
}

impl Default for InfiniteBits {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for InfiniteBits {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl TryFrom<&InfiniteBits> for i64 {
    type Error = BitsError;

    fn try_from(bits: &InfiniteBits) -> Result<Self, Self::Error> {
        bits.to_integer()
    }
}

impl TryFrom<InfiniteBits> for i64 {
    type Error = BitsError;

    fn try_from(bits: InfiniteBits) -> Result<Self, Self::Error> {
        bits.to_integer()
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $body:expr) => {
        impl $trait<&InfiniteBits> for &InfiniteBits {
            type Output = InfiniteBits;

            fn $method(self, rhs: &InfiniteBits) -> InfiniteBits {
                $body(self, rhs)
            }
        }

        impl $trait for InfiniteBits {
            type Output = InfiniteBits;

            fn $method(self, rhs: InfiniteBits) -> InfiniteBits {
                $body(&self, &rhs)
            }
        }
    };
}

binary_op!(Add, add, |x: &InfiniteBits, y: &InfiniteBits| x.sum(y));
binary_op!(Sub, sub, |x: &InfiniteBits, y: &InfiniteBits| x.sum(&y.negate()));
binary_op!(BitAnd, bitand, |x: &InfiniteBits, y: &InfiniteBits| x.bitwise_and(y));
binary_op!(BitOr, bitor, |x: &InfiniteBits, y: &InfiniteBits| x.bitwise_or(y));

impl Neg for &InfiniteBits {
    type Output = InfiniteBits;

    fn neg(self) -> InfiniteBits {
        self.negate()
    }
}

impl Neg for InfiniteBits {
    type Output = InfiniteBits;

    fn neg(self) -> InfiniteBits {
        self.negate()
    }
}

impl Not for &InfiniteBits {
    type Output = InfiniteBits;

    fn not(self) -> InfiniteBits {
        self.bitwise_not()
    }
}

impl Not for InfiniteBits {
    type Output = InfiniteBits;

    fn not(self) -> InfiniteBits {
        self.bitwise_not()
    }
}

impl fmt::Display for InfiniteBits {
    /// `...` and the repeated tail, then the prefix most significant first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, tail) = self.to_bitvec();
        f.write_str("...")?;
        for _ in 0..DISPLAY_TAIL_REPEAT {
            write!(f, "{}", tail)?;
        }
        for bit in prefix.iter().rev() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
