use crate::utility::util::{check_coo, try_filled_vec, PAR_CHUNK, SMALL_NNZ_LIMIT};
use rayon::prelude::*;
use tessel_core::{Coo, IndexType, KernelError, Result, Scalar};

fn copy_into<V: Copy + Send + Sync>(dst: &mut [V], src: &[V]) {
    if src.len() <= SMALL_NNZ_LIMIT {
        dst.copy_from_slice(src);
    } else {
        dst.par_chunks_mut(PAR_CHUNK)
            .zip(src.par_chunks(PAR_CHUNK))
            .for_each(|(d, s)| d.copy_from_slice(s));
    }
}

fn conj_into<T: Scalar>(dst: &mut [T], src: &[T]) {
    if src.len() <= SMALL_NNZ_LIMIT {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s.conj();
        }
    } else {
        dst.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(d, &s)| *d = s.conj());
    }
}

fn check_target<T, I>(op: &'static str, orig: &Coo<T, I>, trans: &Coo<T, I>) -> Result<()> {
    let want = (orig.ncols, orig.nrows);
    if trans.shape() != want {
        return Err(KernelError::dimension_mismatch(op, "trans", want, trans.shape()));
    }
    let nnz = orig.nnz();
    if trans.data.len() != nnz || trans.row.len() != nnz || trans.col.len() != nnz {
        return Err(KernelError::dimension_mismatch(
            op,
            "trans nnz",
            (nnz, nnz),
            (trans.row.len(), trans.data.len()),
        ));
    }
    Ok(())
}

/// Swap the index arrays of `orig` into `trans`; values pass through `conj`
/// when requested. Entries keep their storage order and multiplicity.
fn transpose_into<T: Scalar, I: IndexType>(
    op: &'static str,
    orig: &Coo<T, I>,
    trans: &mut Coo<T, I>,
    conj: bool,
) -> Result<()> {
    check_target(op, orig, trans)?;
    check_coo(op, orig)?;
    log::debug!(
        "{op}: {}x{} -> {}x{} (nnz={})",
        orig.nrows,
        orig.ncols,
        orig.ncols,
        orig.nrows,
        orig.nnz()
    );
    let (row, col, data) = (&mut trans.row, &mut trans.col, &mut trans.data);
    rayon::join(
        || copy_into(row, &orig.col),
        || {
            rayon::join(
                || copy_into(col, &orig.row),
                || {
                    if conj {
                        conj_into(data, &orig.data);
                    } else {
                        copy_into(data, &orig.data);
                    }
                },
            )
        },
    );
    Ok(())
}

/// Write `orig^T` into `trans`, which must be `ncols x nrows` with matching nnz.
pub fn transpose<T: Scalar, I: IndexType>(orig: &Coo<T, I>, trans: &mut Coo<T, I>) -> Result<()> {
    transpose_into("coo::transpose", orig, trans, false)
}

/// Write `orig^H` into `trans`; equal to [`transpose`] for real values.
pub fn conj_transpose<T: Scalar, I: IndexType>(
    orig: &Coo<T, I>,
    trans: &mut Coo<T, I>,
) -> Result<()> {
    transpose_into("coo::conj_transpose", orig, trans, true)
}

fn alloc_transposed<T: Scalar, I: IndexType>(orig: &Coo<T, I>) -> Result<Coo<T, I>> {
    let nnz = orig.nnz();
    Ok(Coo::from_parts_unchecked(
        orig.ncols,
        orig.nrows,
        try_filled_vec(nnz, I::ZERO)?,
        try_filled_vec(nnz, I::ZERO)?,
        try_filled_vec(nnz, T::zero())?,
    ))
}

pub fn transposed<T: Scalar, I: IndexType>(orig: &Coo<T, I>) -> Result<Coo<T, I>> {
    let mut trans = alloc_transposed(orig)?;
    transpose(orig, &mut trans)?;
    Ok(trans)
}

pub fn conj_transposed<T: Scalar, I: IndexType>(orig: &Coo<T, I>) -> Result<Coo<T, I>> {
    let mut trans = alloc_transposed(orig)?;
    conj_transpose(orig, &mut trans)?;
    Ok(trans)
}
