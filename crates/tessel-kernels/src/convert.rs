#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p for indices"
)]
use crate::utility::util::{bucket_by, check_coo, check_dense, try_filled_vec, Buckets, SMALL_NNZ_LIMIT};
use rayon::prelude::*;
use tessel_core::{Coo, Dense, IndexType, KernelError, Layout, Result, Scalar};

/// Convert row-sorted row indices into CSR-style offsets.
///
/// `ptrs.len()` fixes the row count (`rows + 1`). On return `ptrs[0] == 0`,
/// `ptrs[rows] == idxs.len()` and `ptrs[r + 1] - ptrs[r]` counts entries of
/// row `r`. Indices must be ascending; debug builds reject unsorted input,
/// release builds still produce the per-row counts. No allocation.
pub fn convert_row_idxs_to_ptrs<I: IndexType>(idxs: &[I], ptrs: &mut [I]) -> Result<()> {
    const OP: &str = "coo::convert_row_idxs_to_ptrs";
    let Some(nrows) = ptrs.len().checked_sub(1) else {
        return Err(KernelError::precondition(
            OP,
            "pointer buffer must hold rows + 1 entries",
        ));
    };
    if I::try_from_usize(idxs.len()).is_none() {
        return Err(KernelError::precondition(
            OP,
            format!("{} nonzeros do not fit the index type", idxs.len()),
        ));
    }
    for (k, &r) in idxs.iter().enumerate() {
        if !r.try_to_usize().is_some_and(|i| i < nrows) {
            return Err(KernelError::InvalidIndex {
                op: OP,
                position: k,
                index: r.to_i64(),
                bound: nrows,
            });
        }
    }
    if cfg!(debug_assertions) {
        if let Some(k) = idxs.windows(2).position(|w| w[0] > w[1]) {
            return Err(KernelError::precondition(
                OP,
                format!("row indices are not sorted at position {}", k + 1),
            ));
        }
    }

    ptrs.fill(I::ZERO);
    for &r in idxs {
        let slot = &mut ptrs[r.as_usize() + 1];
        *slot = *slot + I::ONE;
    }
    for r in 0..nrows {
        ptrs[r + 1] = ptrs[r + 1] + ptrs[r];
    }
    debug_assert_eq!(ptrs[nrows].as_usize(), idxs.len());
    Ok(())
}

/// Allocating form of [`convert_row_idxs_to_ptrs`].
pub fn row_idxs_to_ptrs<I: IndexType>(idxs: &[I], nrows: usize) -> Result<Vec<I>> {
    let mut ptrs = try_filled_vec(nrows + 1, I::ZERO)?;
    convert_row_idxs_to_ptrs(idxs, &mut ptrs)?;
    Ok(ptrs)
}

fn check_same_shape<T, I>(op: &'static str, a: &Coo<T, I>, d: &Dense<T>) -> Result<()> {
    if d.shape() != a.shape() {
        return Err(KernelError::dimension_mismatch(
            op,
            "result",
            a.shape(),
            d.shape(),
        ));
    }
    check_dense(op, "result", d)
}

/// Entries grouped by the line of `layout` they land in, or `None` when the
/// scatter is small enough to run sequentially.
fn plan_scatter<T, I: IndexType>(a: &Coo<T, I>, layout: Layout) -> Result<Option<Buckets>> {
    if a.data.len() <= SMALL_NNZ_LIMIT {
        return Ok(None);
    }
    let buckets = match layout {
        Layout::RowMajor => bucket_by(&a.row, a.nrows)?,
        Layout::ColMajor => bucket_by(&a.col, a.ncols)?,
    };
    Ok(Some(buckets))
}

fn scatter<T: Scalar, I: IndexType>(
    op: &'static str,
    a: &Coo<T, I>,
    plan: Option<&Buckets>,
    d: &mut Dense<T>,
) {
    let nnz = a.data.len();
    let Some(lines) = plan else {
        log::debug!("{op}: sequential scatter (nnz={nnz})");
        for p in 0..nnz {
            let off = d.offset(a.row[p].as_usize(), a.col[p].as_usize());
            d.data[off] += a.data[p];
        }
        return;
    };
    // Each task owns one output line, so duplicates sum in storage order.
    log::debug!("{op}: per-line scatter (layout={:?}, nnz={nnz})", d.layout);
    let (major, stride, layout) = (d.major(), d.stride, d.layout);
    d.data
        .par_chunks_mut(stride)
        .take(major)
        .enumerate()
        .for_each(|(m, line)| {
            for &p in lines.get(m) {
                let off = match layout {
                    Layout::RowMajor => a.col[p].as_usize(),
                    Layout::ColMajor => a.row[p].as_usize(),
                };
                line[off] += a.data[p];
            }
        });
}

/// Zero `result`, then add every entry of `source` at its coordinate.
pub fn convert_to_dense<T: Scalar, I: IndexType>(
    source: &Coo<T, I>,
    result: &mut Dense<T>,
) -> Result<()> {
    const OP: &str = "coo::convert_to_dense";
    check_same_shape(OP, source, result)?;
    check_coo(OP, source)?;
    let plan = plan_scatter(source, result.layout)?;
    result.fill(T::zero());
    scatter(OP, source, plan.as_ref(), result);
    Ok(())
}

/// Add every entry of `source` into `result` without zeroing it first.
pub fn fill_in_dense<T: Scalar, I: IndexType>(
    source: &Coo<T, I>,
    result: &mut Dense<T>,
) -> Result<()> {
    const OP: &str = "coo::fill_in_dense";
    check_same_shape(OP, source, result)?;
    check_coo(OP, source)?;
    let plan = plan_scatter(source, result.layout)?;
    scatter(OP, source, plan.as_ref(), result);
    Ok(())
}

/// Materialize `source` into a freshly allocated dense matrix.
pub fn to_dense<T: Scalar, I: IndexType>(source: &Coo<T, I>, layout: Layout) -> Result<Dense<T>> {
    let (nrows, ncols) = source.shape();
    let len = nrows.checked_mul(ncols).ok_or_else(|| {
        KernelError::precondition("coo::to_dense", "dense extent overflows usize")
    })?;
    let data = try_filled_vec(len, T::zero())?;
    let mut result = match layout {
        Layout::RowMajor => Dense::from_row_major(nrows, ncols, data)?,
        Layout::ColMajor => Dense::from_col_major(nrows, ncols, data)?,
    };
    fill_in_dense(source, &mut result)?;
    Ok(result)
}
