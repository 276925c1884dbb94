#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p to denote indices and pointers"
)]
use crate::utility::util::{
    bucket_by, check_coo, check_dense, try_filled_vec, PAR_CHUNK, SMALL_DIM_LIMIT, SMALL_NNZ_LIMIT,
    STRIPE_ROWS,
};
use rayon::prelude::*;
use std::cell::RefCell;
use tessel_core::{Coo, Dense, IndexType, KernelError, Layout, Result, Scalar};
use thread_local::ThreadLocal;

/// What happens to the incoming contents of `c`.
#[derive(Debug, Clone, Copy)]
enum Beta<T> {
    /// Discard without reading
    Overwrite,
    /// Accumulate onto
    Keep,
    Scale(T),
}

impl<T: Scalar> Beta<T> {
    fn from_scalar(beta: T) -> Self {
        if beta.is_zero() {
            Self::Overwrite
        } else if beta.is_one() {
            Self::Keep
        } else {
            Self::Scale(beta)
        }
    }

    #[inline]
    fn apply(self, line: &mut [T]) {
        match self {
            Self::Overwrite => line.fill(T::zero()),
            Self::Keep => {}
            Self::Scale(s) => line.iter_mut().for_each(|x| *x = s * *x),
        }
    }

    /// `ax + beta * old`
    #[inline]
    fn combine(self, ax: T, old: T) -> T {
        match self {
            Self::Overwrite => ax,
            Self::Keep => ax + old,
            Self::Scale(s) => ax + s * old,
        }
    }
}

fn check_dims<T, I>(op: &'static str, a: &Coo<T, I>, b: &Dense<T>, c: &Dense<T>) -> Result<()> {
    if b.nrows != a.ncols {
        return Err(KernelError::dimension_mismatch(
            op,
            "b",
            (a.ncols, b.ncols),
            b.shape(),
        ));
    }
    if c.shape() != (a.nrows, b.ncols) {
        return Err(KernelError::dimension_mismatch(
            op,
            "c",
            (a.nrows, b.ncols),
            c.shape(),
        ));
    }
    check_dense(op, "b", b)?;
    check_dense(op, "c", c)
}

fn scalar_of<T: Scalar>(op: &'static str, what: &'static str, m: &Dense<T>) -> Result<T> {
    m.scalar_value()
        .ok_or_else(|| KernelError::dimension_mismatch(op, what, (1, 1), m.shape()))
}

/// `line += s * b[col, ..]`
#[inline]
fn add_scaled_row<T: Scalar>(b: &Dense<T>, col: usize, s: T, line: &mut [T]) {
    if b.layout == Layout::RowMajor {
        let off = col * b.stride;
        T::axpy(s, &b.data[off..off + line.len()], line);
    } else {
        for (j, y) in line.iter_mut().enumerate() {
            *y += s * b.get(col, j);
        }
    }
}

/// `c = alpha * (a * b) + beta * c` for already validated operands.
fn apply<T: Scalar, I: IndexType>(
    op: &'static str,
    alpha: T,
    a: &Coo<T, I>,
    b: &Dense<T>,
    beta: Beta<T>,
    c: &mut Dense<T>,
) -> Result<()> {
    let nrows = a.nrows;
    let k = b.ncols;
    let nnz = a.data.len();
    if nrows == 0 || k == 0 {
        return Ok(());
    }

    let small = nrows <= SMALL_DIM_LIMIT || nnz <= SMALL_NNZ_LIMIT;
    if small {
        log::debug!("{op}: sequential path (nrows={nrows}, k={k}, nnz={nnz})");
        let (major, minor, stride) = (c.major(), c.minor(), c.stride);
        for line in c.data.chunks_mut(stride).take(major) {
            beta.apply(&mut line[..minor]);
        }
        for p in 0..nnz {
            let i = a.row[p].as_usize();
            let j = a.col[p].as_usize();
            let s = alpha * a.data[p];
            if c.layout == Layout::RowMajor {
                let off = i * c.stride;
                add_scaled_row(b, j, s, &mut c.data[off..off + k]);
            } else {
                for t in 0..k {
                    let off = c.offset(i, t);
                    c.data[off] += s * b.get(j, t);
                }
            }
        }
        return Ok(());
    }

    if k == 1 && nrows <= STRIPE_ROWS * 2 {
        log::debug!("{op}: thread-local partials (nrows={nrows}, nnz={nnz})");
        let mut y = try_filled_vec(nrows, T::zero())?;
        let chunk = PAR_CHUNK.max(nnz / (rayon::current_num_threads().max(1) * 8));
        let tls: ThreadLocal<RefCell<Vec<T>>> = ThreadLocal::new();
        (0..nnz.div_ceil(chunk))
            .into_par_iter()
            .try_for_each(|t| -> Result<()> {
                let start = t * chunk;
                let end = (start + chunk).min(nnz);
                let cell = tls.get_or_try(|| try_filled_vec(nrows, T::zero()).map(RefCell::new))?;
                let mut acc = cell.borrow_mut();
                for p in start..end {
                    let i = a.row[p].as_usize();
                    let j = a.col[p].as_usize();
                    acc[i] += a.data[p] * b.get(j, 0);
                }
                Ok(())
            })?;
        for cell in tls {
            for (yi, v) in y.iter_mut().zip(cell.into_inner()) {
                *yi += v;
            }
        }
        for (i, yi) in y.into_iter().enumerate() {
            let off = c.offset(i, 0);
            c.data[off] = beta.combine(alpha * yi, c.data[off]);
        }
        return Ok(());
    }

    let stride = c.stride;
    match c.layout {
        Layout::RowMajor => {
            log::debug!("{op}: per-row ownership (nrows={nrows}, k={k}, nnz={nnz})");
            let rows = bucket_by(&a.row, nrows)?;
            c.data
                .par_chunks_mut(stride)
                .take(nrows)
                .enumerate()
                .for_each(|(i, line)| {
                    let line = &mut line[..k];
                    beta.apply(line);
                    for &p in rows.get(i) {
                        add_scaled_row(b, a.col[p].as_usize(), alpha * a.data[p], line);
                    }
                });
        }
        Layout::ColMajor => {
            log::debug!("{op}: per-column ownership (nrows={nrows}, k={k}, nnz={nnz})");
            c.data
                .par_chunks_mut(stride)
                .take(k)
                .enumerate()
                .for_each(|(t, line)| {
                    let line = &mut line[..nrows];
                    beta.apply(line);
                    for p in 0..nnz {
                        let i = a.row[p].as_usize();
                        let j = a.col[p].as_usize();
                        line[i] += alpha * a.data[p] * b.get(j, t);
                    }
                });
        }
    }
    Ok(())
}

/// C = A @ B, overwriting C
pub fn spmv<T: Scalar, I: IndexType>(a: &Coo<T, I>, b: &Dense<T>, c: &mut Dense<T>) -> Result<()> {
    const OP: &str = "coo::spmv";
    check_dims(OP, a, b, c)?;
    check_coo(OP, a)?;
    apply(OP, T::one(), a, b, Beta::Overwrite, c)
}

/// C = alpha * (A @ B) + beta * C
///
/// A zero `beta` discards C without reading it, so NaN or uninitialised
/// contents do not leak into the result.
pub fn advanced_spmv<T: Scalar, I: IndexType>(
    alpha: &Dense<T>,
    a: &Coo<T, I>,
    b: &Dense<T>,
    beta: &Dense<T>,
    c: &mut Dense<T>,
) -> Result<()> {
    const OP: &str = "coo::advanced_spmv";
    let alpha = scalar_of(OP, "alpha", alpha)?;
    let beta = scalar_of(OP, "beta", beta)?;
    check_dims(OP, a, b, c)?;
    check_coo(OP, a)?;
    apply(OP, alpha, a, b, Beta::from_scalar(beta), c)
}

/// C += A @ B
pub fn spmv2<T: Scalar, I: IndexType>(a: &Coo<T, I>, b: &Dense<T>, c: &mut Dense<T>) -> Result<()> {
    const OP: &str = "coo::spmv2";
    check_dims(OP, a, b, c)?;
    check_coo(OP, a)?;
    apply(OP, T::one(), a, b, Beta::Keep, c)
}

/// C += alpha * (A @ B)
pub fn advanced_spmv2<T: Scalar, I: IndexType>(
    alpha: &Dense<T>,
    a: &Coo<T, I>,
    b: &Dense<T>,
    c: &mut Dense<T>,
) -> Result<()> {
    const OP: &str = "coo::advanced_spmv2";
    let alpha = scalar_of(OP, "alpha", alpha)?;
    check_dims(OP, a, b, c)?;
    check_coo(OP, a)?;
    apply(OP, alpha, a, b, Beta::Keep, c)
}
