use crate::utility::util::check_coo;
use tessel_core::{Coo, IndexType, KernelError, Result, Scalar};

/// Write the main diagonal of `orig` into `diag` (length `min(rows, cols)`).
///
/// Repeated diagonal coordinates sum; diagonal positions with no stored
/// entry are zero.
pub fn extract_diagonal<T: Scalar, I: IndexType>(orig: &Coo<T, I>, diag: &mut [T]) -> Result<()> {
    const OP: &str = "coo::extract_diagonal";
    let n = orig.nrows.min(orig.ncols);
    if diag.len() != n {
        return Err(KernelError::dimension_mismatch(
            OP,
            "diag",
            (n, 1),
            (diag.len(), 1),
        ));
    }
    check_coo(OP, orig)?;
    diag.fill(T::zero());
    for (&i, (&j, &v)) in orig.row.iter().zip(orig.col.iter().zip(&orig.data)) {
        if i == j {
            diag[i.as_usize()] += v;
        }
    }
    Ok(())
}
