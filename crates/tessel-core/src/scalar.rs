//! Value types a coordinate matrix may store

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul};
use wide::{f32x8, f64x4};

/// Real or complex scalar stored in a sparse or dense matrix.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + AddAssign
    + Mul<Output = Self>
    + 'static
{
    /// Complex conjugate; identity for real types.
    fn conj(self) -> Self;

    /// y += alpha * x
    #[inline]
    fn axpy(alpha: Self, x: &[Self], y: &mut [Self]) {
        debug_assert_eq!(x.len(), y.len());
        for (yi, &xi) in y.iter_mut().zip(x) {
            *yi += alpha * xi;
        }
    }
}

// SIMD axpy for the real types; the tail falls back to the scalar loop.
macro_rules! impl_real_scalar {
    ($t:ty, $simd:ty, $lanes:expr) => {
        impl Scalar for $t {
            #[inline]
            fn conj(self) -> Self {
                self
            }

            #[inline]
            fn axpy(alpha: Self, x: &[Self], y: &mut [Self]) {
                debug_assert_eq!(x.len(), y.len());
                let av = <$simd>::splat(alpha);
                let mut xc = x.chunks_exact($lanes);
                let mut yc = y.chunks_exact_mut($lanes);
                let mut buf = [0.0 as $t; $lanes];
                for (xs, ys) in (&mut xc).zip(&mut yc) {
                    buf.copy_from_slice(xs);
                    let vx = <$simd>::from(buf);
                    buf.copy_from_slice(ys);
                    let vy = <$simd>::from(buf);
                    ys.copy_from_slice(&(vy + vx * av).to_array());
                }
                for (yi, &xi) in yc.into_remainder().iter_mut().zip(xc.remainder()) {
                    *yi += alpha * xi;
                }
            }
        }
    };
}

impl_real_scalar!(f64, f64x4, 4);
impl_real_scalar!(f32, f32x8, 8);

impl Scalar for Complex<f64> {
    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}

impl Scalar for Complex<f32> {
    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}
