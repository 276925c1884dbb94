//! CPU kernel table.
//!
//! [`CpuExecutor`] implements [`CooKernels`] for every supported value and
//! index type by forwarding to the free kernel functions. Work runs on the
//! global rayon pool unless the executor was built with its own pool.

use crate::{convert, diagonal, spmv, transform};
use std::sync::Arc;
use tessel_core::{Coo, CooKernels, Dense, IndexType, KernelError, Result, Scalar};

/// Executor configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuConfig {
    /// Worker threads for a dedicated pool; `None` shares the global pool
    /// (sized by `RAYON_NUM_THREADS` or the core count).
    pub num_threads: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct CpuExecutor {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuExecutor {
    /// Executor running on the global rayon pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CpuConfig) -> Result<Self> {
        let Some(n) = config.num_threads else {
            return Ok(Self::new());
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .thread_name(|i| format!("tessel-cpu-{i}"))
            .build()
            .map_err(|e| KernelError::ThreadPool(e.to_string()))?;
        log::trace!("built dedicated CPU pool with {} threads", pool.current_num_threads());
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Executor with a dedicated pool of `n` threads (`0` lets rayon choose).
    pub fn with_threads(n: usize) -> Result<Self> {
        Self::from_config(&CpuConfig {
            num_threads: Some(n),
        })
    }

    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |p| p.current_num_threads())
    }

    fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

impl<T: Scalar, I: IndexType> CooKernels<T, I> for CpuExecutor {
    fn spmv(&self, a: &Coo<T, I>, b: &Dense<T>, c: &mut Dense<T>) -> Result<()> {
        self.install(|| spmv::spmv(a, b, c))
    }

    fn advanced_spmv(
        &self,
        alpha: &Dense<T>,
        a: &Coo<T, I>,
        b: &Dense<T>,
        beta: &Dense<T>,
        c: &mut Dense<T>,
    ) -> Result<()> {
        self.install(|| spmv::advanced_spmv(alpha, a, b, beta, c))
    }

    fn spmv2(&self, a: &Coo<T, I>, b: &Dense<T>, c: &mut Dense<T>) -> Result<()> {
        self.install(|| spmv::spmv2(a, b, c))
    }

    fn advanced_spmv2(
        &self,
        alpha: &Dense<T>,
        a: &Coo<T, I>,
        b: &Dense<T>,
        c: &mut Dense<T>,
    ) -> Result<()> {
        self.install(|| spmv::advanced_spmv2(alpha, a, b, c))
    }

    fn convert_row_idxs_to_ptrs(&self, idxs: &[I], ptrs: &mut [I]) -> Result<()> {
        convert::convert_row_idxs_to_ptrs(idxs, ptrs)
    }

    fn transpose(&self, orig: &Coo<T, I>, trans: &mut Coo<T, I>) -> Result<()> {
        self.install(|| transform::transpose(orig, trans))
    }

    fn conj_transpose(&self, orig: &Coo<T, I>, trans: &mut Coo<T, I>) -> Result<()> {
        self.install(|| transform::conj_transpose(orig, trans))
    }

    fn convert_to_dense(&self, source: &Coo<T, I>, result: &mut Dense<T>) -> Result<()> {
        self.install(|| convert::convert_to_dense(source, result))
    }

    fn fill_in_dense(&self, source: &Coo<T, I>, result: &mut Dense<T>) -> Result<()> {
        self.install(|| convert::fill_in_dense(source, result))
    }

    fn extract_diagonal(&self, orig: &Coo<T, I>, diag: &mut [T]) -> Result<()> {
        diagonal::extract_diagonal(orig, diag)
    }
}
