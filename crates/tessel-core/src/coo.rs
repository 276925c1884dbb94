//! COO format definition and constructors

use crate::error::{KernelError, Result};
use crate::index::IndexType;
use crate::scalar::Scalar;

/// Coordinate-format sparse matrix: parallel `row`/`col`/`data` arrays.
///
/// Entries may be unsorted and `(row, col)` pairs may repeat; repeated
/// pairs are additive wherever an operation is linear.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Coo<T, I> {
    pub data: Vec<T>,
    pub row: Vec<I>, // length nnz
    pub col: Vec<I>, // length nnz
    pub ncols: usize,
    pub nrows: usize,
}

impl<T, I> Coo<T, I> {
    #[inline]
    #[must_use]
    pub const fn nnz(&self) -> usize {
        self.data.len()
    }
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        row: Vec<I>,
        col: Vec<I>,
        data: Vec<T>,
    ) -> Self {
        Self {
            data,
            row,
            col,
            ncols,
            nrows,
        }
    }
}

impl<T: Scalar, I: IndexType> Coo<T, I> {
    #[inline]
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row: Vec<I>,
        col: Vec<I>,
        data: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        if row.len() != data.len() || col.len() != data.len() {
            return Err(KernelError::InvalidParts(
                "row/col/data must have equal length".into(),
            ));
        }
        if I::try_from_usize(nrows).is_none() || I::try_from_usize(ncols).is_none() {
            return Err(KernelError::InvalidParts(
                "shape does not fit the index type".into(),
            ));
        }
        if check {
            for (&i, &j) in row.iter().zip(&col) {
                if i < I::ZERO || j < I::ZERO {
                    return Err(KernelError::InvalidParts(
                        "indices must be non-negative".into(),
                    ));
                }
                let ok_i = i.try_to_usize().is_some_and(|ii| ii < nrows);
                let ok_j = j.try_to_usize().is_some_and(|jj| jj < ncols);
                if !ok_i || !ok_j {
                    return Err(KernelError::InvalidParts("indices out of bounds".into()));
                }
            }
        }
        Ok(Self::from_parts_unchecked(nrows, ncols, row, col, data))
    }

    /// Build from `(row, col, value)` triplets, checking bounds.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self> {
        let iter = triplets.into_iter();
        let (lo, _) = iter.size_hint();
        let mut row = Vec::with_capacity(lo);
        let mut col = Vec::with_capacity(lo);
        let mut data = Vec::with_capacity(lo);
        for (i, j, v) in iter {
            let (Some(ii), Some(jj)) = (I::try_from_usize(i), I::try_from_usize(j)) else {
                return Err(KernelError::InvalidParts(
                    "index does not fit the index type".into(),
                ));
            };
            row.push(ii);
            col.push(jj);
            data.push(v);
        }
        Self::from_parts(nrows, ncols, row, col, data, true)
    }

    /// All-zero triplet storage of the given size, e.g. as a transpose target.
    #[must_use]
    pub fn zeros(nrows: usize, ncols: usize, nnz: usize) -> Self {
        Self::from_parts_unchecked(
            nrows,
            ncols,
            vec![I::ZERO; nnz],
            vec![I::ZERO; nnz],
            vec![T::zero(); nnz],
        )
    }

    /// Iterate stored entries as `(row, col, value)` in storage order.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.data)
            .map(|((&i, &j), &v)| (i.as_usize(), j.as_usize(), v))
    }
}
