//! Integer types usable as row/column indices

use std::fmt::{Debug, Display};
use std::ops::Add;

/// Signed integer type used for stored coordinates and row pointers.
pub trait IndexType:
    Copy + Send + Sync + Debug + Display + Ord + Add<Output = Self> + 'static
{
    const ZERO: Self;
    const ONE: Self;

    /// `None` when negative or too large for `usize`.
    fn try_to_usize(self) -> Option<usize>;

    /// `None` when `x` does not fit.
    fn try_from_usize(x: usize) -> Option<Self>;

    fn to_i64(self) -> i64;

    /// Convert a validated, non-negative index.
    fn as_usize(self) -> usize;
}

macro_rules! impl_index_type {
    ($($t:ty),*) => {
        $(
            impl IndexType for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn try_to_usize(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline]
                fn try_from_usize(x: usize) -> Option<Self> {
                    Self::try_from(x).ok()
                }

                #[inline]
                fn to_i64(self) -> i64 {
                    i64::from(self)
                }

                #[inline]
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                fn as_usize(self) -> usize {
                    debug_assert!(self >= 0, "index must be non-negative");
                    self as usize
                }
            }
        )*
    };
}

impl_index_type!(i32, i64);
