//! Infinite two's-complement bit strings
//!
//! A signed integer is an eventually-constant bit sequence:
//!   ...bbbb x_k ... x_1 x_0
//! Only the finite prefix x_k..x_0 that differs from the tail is stored.
//! The tail itself is a single sentinel leaf (0 = ...000, -1 = ...111).

mod bit;
mod infinite;

pub use bit::Bit;
pub use infinite::{InfiniteBits, DISPLAY_TAIL_REPEAT};

use thiserror::Error;

/// Errors raised at the integer boundary of the bit algebra
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitsError {
    /// Value does not fit in the host integer
    #[error("bit string {0} does not fit in a 64-bit signed integer")]
    Overflow(InfiniteBits),

    /// Bit index given as a negative integer
    #[error("bit index {0} is negative")]
    NegativeIndex(i64),

    /// Integer other than 0 or 1 converted to a bit
    #[error("{0} is not a bit (expected 0 or 1)")]
    InvalidBit(i64),

    /// Navigation orbit never reaches a stopping value
    #[error("{operation} never terminates on {value}")]
    Divergent {
        /// Primitive that rejected the input
        operation: &'static str,
        /// Offending input
        value: InfiniteBits,
    },
}

/// Validate a signed index for the index-addressed operations.
pub fn bit_index(idx: i64) -> Result<usize, BitsError> {
    usize::try_from(idx).map_err(|_| BitsError::NegativeIndex(idx))
}
