//! CPU kernels for coordinate-format sparse matrices (pure Rust, parallel ready)

use tessel_core::{KernelError, Result};

/// Size the global rayon pool. `None` leaves rayon's default, which honours
/// `RAYON_NUM_THREADS`. Fails if the global pool was already built.
pub fn init_parallel(num_threads: Option<usize>) -> Result<()> {
    let Some(n) = num_threads else {
        return Ok(());
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global()
        .map_err(|e| KernelError::ThreadPool(e.to_string()))
}

pub mod convert;
pub mod diagonal;
pub mod executor;
pub mod spmv;
pub mod transform;
pub mod utility;

pub use convert::{convert_row_idxs_to_ptrs, convert_to_dense, fill_in_dense, row_idxs_to_ptrs, to_dense};
pub use diagonal::extract_diagonal;
pub use executor::{CpuConfig, CpuExecutor};
pub use spmv::{advanced_spmv, advanced_spmv2, spmv, spmv2};
pub use transform::{conj_transpose, conj_transposed, transpose, transposed};
