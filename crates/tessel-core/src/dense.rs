//! Dense matrix view with a fixed row- or column-major stride

use crate::error::{KernelError, Result};
use crate::scalar::Scalar;

/// Storage order of a [`Dense`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    RowMajor,
    ColMajor,
}

/// Rectangular `nrows x ncols` buffer addressed through `stride`.
///
/// For `RowMajor`, element `(r, c)` lives at `r * stride + c`; for
/// `ColMajor`, at `c * stride + r`. Padding between lines is never read or
/// written by the kernels.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Dense<T> {
    pub data: Vec<T>,
    pub nrows: usize,
    pub ncols: usize,
    pub stride: usize,
    pub layout: Layout,
}

#[inline]
const fn required_len(major: usize, minor: usize, stride: usize) -> Option<usize> {
    if major == 0 || minor == 0 {
        return Some(0);
    }
    match (major - 1).checked_mul(stride) {
        Some(x) => x.checked_add(minor),
        None => None,
    }
}

impl<T> Dense<T> {
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of lines along the storage order (rows for `RowMajor`).
    #[inline]
    #[must_use]
    pub const fn major(&self) -> usize {
        match self.layout {
            Layout::RowMajor => self.nrows,
            Layout::ColMajor => self.ncols,
        }
    }

    /// Logical length of each line.
    #[inline]
    #[must_use]
    pub const fn minor(&self) -> usize {
        match self.layout {
            Layout::RowMajor => self.ncols,
            Layout::ColMajor => self.nrows,
        }
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self, r: usize, c: usize) -> usize {
        match self.layout {
            Layout::RowMajor => r * self.stride + c,
            Layout::ColMajor => c * self.stride + r,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.nrows == 1 && self.ncols == 1
    }

    /// Stride covers a line and `data` covers the whole logical extent.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        if self.stride < self.minor() || self.stride == 0 {
            return false;
        }
        match required_len(self.major(), self.minor(), self.stride) {
            Some(need) => self.data.len() >= need,
            None => false,
        }
    }
}

impl<T: Scalar> Dense<T> {
    /// Wrap `data` as a strided view, validating stride and extent.
    pub fn with_stride(
        nrows: usize,
        ncols: usize,
        stride: usize,
        layout: Layout,
        data: Vec<T>,
    ) -> Result<Self> {
        let (major, minor) = match layout {
            Layout::RowMajor => (nrows, ncols),
            Layout::ColMajor => (ncols, nrows),
        };
        if stride < minor.max(1) {
            return Err(KernelError::InvalidParts(format!(
                "stride {stride} is smaller than line length {minor}"
            )));
        }
        let need = required_len(major, minor, stride)
            .ok_or_else(|| KernelError::InvalidParts("dense extent overflows usize".into()))?;
        if data.len() < need {
            return Err(KernelError::InvalidParts(format!(
                "buffer of length {} cannot hold a {nrows}x{ncols} matrix with stride {stride}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            nrows,
            ncols,
            stride,
            layout,
        })
    }

    pub fn from_row_major(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        Self::with_stride(nrows, ncols, ncols.max(1), Layout::RowMajor, data)
    }

    pub fn from_col_major(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        Self::with_stride(nrows, ncols, nrows.max(1), Layout::ColMajor, data)
    }

    #[must_use]
    pub fn zeros(nrows: usize, ncols: usize, layout: Layout) -> Self {
        let stride = match layout {
            Layout::RowMajor => ncols.max(1),
            Layout::ColMajor => nrows.max(1),
        };
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
            stride,
            layout,
        }
    }

    /// 1x1 matrix, the form scaling factors are passed in.
    #[must_use]
    pub fn scalar(value: T) -> Self {
        Self {
            data: vec![value],
            nrows: 1,
            ncols: 1,
            stride: 1,
            layout: Layout::RowMajor,
        }
    }

    #[inline]
    #[must_use]
    pub fn scalar_value(&self) -> Option<T> {
        if self.is_scalar() {
            self.data.first().copied()
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> T {
        debug_assert!(r < self.nrows && c < self.ncols);
        self.data[self.offset(r, c)]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: T) {
        debug_assert!(r < self.nrows && c < self.ncols);
        let off = self.offset(r, c);
        self.data[off] = value;
    }

    /// Overwrite the logical extent with `value`, leaving padding alone.
    pub fn fill(&mut self, value: T) {
        let minor = self.minor();
        if minor == 0 {
            return;
        }
        let major = self.major();
        for line in self.data.chunks_mut(self.stride).take(major) {
            line[..minor].fill(value);
        }
    }

    /// Copy out the logical extent in row-major order.
    #[must_use]
    pub fn to_row_major_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.nrows * self.ncols);
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                out.push(self.get(r, c));
            }
        }
        out
    }
}
