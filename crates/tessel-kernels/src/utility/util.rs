//! Utility constants, scratch allocation, and validation for the COO kernels
//
// Thresholds pick between the sequential and parallel paths; scratch
// buffers go through `try_reserve` so allocation failure surfaces as an
// error before any caller-owned output is written.

use rayon::prelude::*;
use tessel_core::{Coo, Dense, IndexType, KernelError, Result};

/// Stripe/block size for row-wise operations
pub const STRIPE_ROWS: usize = 8192;
/// Threshold for switching between sequential and parallel algorithms (dimension)
pub const SMALL_DIM_LIMIT: usize = 2048;
/// Threshold for switching between sequential and parallel algorithms (nnz)
pub const SMALL_NNZ_LIMIT: usize = 32 * 1024;
/// Minimum nonzeros handed to one parallel task
pub const PAR_CHUNK: usize = 4096;

/// Allocate `len` copies of `value`, reporting failure instead of aborting.
pub fn try_filled_vec<V: Clone>(len: usize, value: V) -> Result<Vec<V>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| KernelError::AllocationFailure {
            bytes: len.saturating_mul(std::mem::size_of::<V>()),
        })?;
    v.resize(len, value);
    Ok(v)
}

/// Entry positions grouped by key: entries of key `b` are
/// `perm[ptrs[b]..ptrs[b + 1]]`, in storage order.
#[derive(Debug)]
pub struct Buckets {
    pub ptrs: Vec<usize>,
    pub perm: Vec<usize>,
}

impl Buckets {
    #[inline]
    #[must_use]
    pub fn get(&self, b: usize) -> &[usize] {
        &self.perm[self.ptrs[b]..self.ptrs[b + 1]]
    }
}

/// Counting sort of entry positions by `keys`, which must lie in `[0, nbuckets)`.
pub fn bucket_by<I: IndexType>(keys: &[I], nbuckets: usize) -> Result<Buckets> {
    let mut ptrs = try_filled_vec(nbuckets + 1, 0usize)?;
    let mut next = try_filled_vec(nbuckets, 0usize)?;
    let mut perm = try_filled_vec(keys.len(), 0usize)?;
    for &k in keys {
        ptrs[k.as_usize() + 1] += 1;
    }
    for b in 0..nbuckets {
        ptrs[b + 1] += ptrs[b];
    }
    next.copy_from_slice(&ptrs[..nbuckets]);
    for (p, &k) in keys.iter().enumerate() {
        let slot = &mut next[k.as_usize()];
        perm[*slot] = p;
        *slot += 1;
    }
    Ok(Buckets { ptrs, perm })
}

/// Reject a dense operand whose stride or buffer cannot hold its shape.
pub fn check_dense<T>(op: &'static str, what: &'static str, m: &Dense<T>) -> Result<()> {
    if m.is_well_formed() {
        Ok(())
    } else {
        Err(KernelError::precondition(
            op,
            format!(
                "{what}: buffer of length {} with stride {} cannot hold a {}x{} matrix",
                m.data.len(),
                m.stride,
                m.nrows,
                m.ncols
            ),
        ))
    }
}

#[inline]
fn out_of_range<I: IndexType>(x: I, bound: usize) -> bool {
    !x.try_to_usize().is_some_and(|v| v < bound)
}

/// Check that `a`'s triplet arrays agree in length and every coordinate is in range.
pub fn check_coo<T: Sync, I: IndexType>(op: &'static str, a: &Coo<T, I>) -> Result<()> {
    let nnz = a.data.len();
    if a.row.len() != nnz || a.col.len() != nnz {
        return Err(KernelError::precondition(
            op,
            format!(
                "row/col/data must have equal length, got {}/{}/{}",
                a.row.len(),
                a.col.len(),
                nnz
            ),
        ));
    }
    let bad = |k: usize| out_of_range(a.row[k], a.nrows) || out_of_range(a.col[k], a.ncols);
    let first_bad = if nnz <= SMALL_NNZ_LIMIT {
        (0..nnz).find(|&k| bad(k))
    } else {
        (0..nnz).into_par_iter().find_first(|&k| bad(k))
    };
    match first_bad {
        None => Ok(()),
        Some(k) => {
            let (index, bound) = if out_of_range(a.row[k], a.nrows) {
                (a.row[k], a.nrows)
            } else {
                (a.col[k], a.ncols)
            };
            Err(KernelError::InvalidIndex {
                op,
                position: k,
                index: index.to_i64(),
                bound,
            })
        }
    }
}
