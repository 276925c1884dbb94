//! Kernel table for coordinate-format matrices.
//!
//! A backend implements [`CooKernels`] for the value/index pairs it
//! supports. Every method has a default body that reports
//! [`KernelError::NotImplemented`], so an operation a backend does not
//! provide fails loudly instead of returning zeroed or partial output.

use crate::coo::Coo;
use crate::dense::Dense;
use crate::error::{KernelError, Result};
use crate::index::IndexType;
use crate::scalar::Scalar;

pub trait CooKernels<T: Scalar, I: IndexType> {
    /// `c = a * b`, overwriting `c`.
    fn spmv(&self, _a: &Coo<T, I>, _b: &Dense<T>, _c: &mut Dense<T>) -> Result<()> {
        Err(KernelError::not_implemented("coo::spmv"))
    }

    /// `c = alpha * (a * b) + beta * c`; `alpha`, `beta` are 1x1.
    ///
    /// When `beta` is zero the prior contents of `c` are never read.
    fn advanced_spmv(
        &self,
        _alpha: &Dense<T>,
        _a: &Coo<T, I>,
        _b: &Dense<T>,
        _beta: &Dense<T>,
        _c: &mut Dense<T>,
    ) -> Result<()> {
        Err(KernelError::not_implemented("coo::advanced_spmv"))
    }

    /// `c += a * b`.
    fn spmv2(&self, _a: &Coo<T, I>, _b: &Dense<T>, _c: &mut Dense<T>) -> Result<()> {
        Err(KernelError::not_implemented("coo::spmv2"))
    }

    /// `c += alpha * (a * b)`.
    fn advanced_spmv2(
        &self,
        _alpha: &Dense<T>,
        _a: &Coo<T, I>,
        _b: &Dense<T>,
        _c: &mut Dense<T>,
    ) -> Result<()> {
        Err(KernelError::not_implemented("coo::advanced_spmv2"))
    }

    /// Row-sorted `idxs` to CSR-style offsets; `ptrs.len()` is `rows + 1`.
    fn convert_row_idxs_to_ptrs(&self, _idxs: &[I], _ptrs: &mut [I]) -> Result<()> {
        Err(KernelError::not_implemented("coo::convert_row_idxs_to_ptrs"))
    }

    /// Write `orig^T` into the pre-allocated `trans`.
    fn transpose(&self, _orig: &Coo<T, I>, _trans: &mut Coo<T, I>) -> Result<()> {
        Err(KernelError::not_implemented("coo::transpose"))
    }

    /// Write `orig^H` into the pre-allocated `trans`.
    fn conj_transpose(&self, _orig: &Coo<T, I>, _trans: &mut Coo<T, I>) -> Result<()> {
        Err(KernelError::not_implemented("coo::conj_transpose"))
    }

    /// Zero `result` then scatter-add every entry of `source` into it.
    fn convert_to_dense(&self, _source: &Coo<T, I>, _result: &mut Dense<T>) -> Result<()> {
        Err(KernelError::not_implemented("coo::convert_to_dense"))
    }

    /// Scatter-add every entry of `source` into `result` without zeroing.
    fn fill_in_dense(&self, _source: &Coo<T, I>, _result: &mut Dense<T>) -> Result<()> {
        Err(KernelError::not_implemented("coo::fill_in_dense"))
    }

    /// Diagonal of `orig` into `diag` of length `min(rows, cols)`.
    fn extract_diagonal(&self, _orig: &Coo<T, I>, _diag: &mut [T]) -> Result<()> {
        Err(KernelError::not_implemented("coo::extract_diagonal"))
    }
}
