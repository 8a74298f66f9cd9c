//! Two-valued logical unit

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use super::BitsError;

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    /// Logical zero.
    Zero,

    /// Logical one.
    One,
}

impl Bit {
    /// Bit for the low digit of `n` (`n mod 2`, always 0 or 1).
    #[inline]
    pub fn of_parity(n: i64) -> Self {
        if n.rem_euclid(2) == 0 {
            Bit::Zero
        } else {
            Bit::One
        }
    }

    /// Numeric value, 0 or 1.
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// True for [`Bit::One`].
    #[inline]
    pub fn is_one(self) -> bool {
        self == Bit::One
    }
}

impl From<bool> for Bit {
    fn from(set: bool) -> Self {
        if set {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl TryFrom<i64> for Bit {
    type Error = BitsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(BitsError::InvalidBit(other)),
        }
    }
}

impl BitAnd for Bit {
    type Output = Bit;

    fn bitand(self, rhs: Bit) -> Bit {
        match (self, rhs) {
            (Bit::One, Bit::One) => Bit::One,
            _ => Bit::Zero,
        }
    }
}

impl BitOr for Bit {
    type Output = Bit;

    fn bitor(self, rhs: Bit) -> Bit {
        match (self, rhs) {
            (Bit::Zero, Bit::Zero) => Bit::Zero,
            _ => Bit::One,
        }
    }
}

impl Not for Bit {
    type Output = Bit;

    fn not(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
