//! Core data structures and the kernel contract for Tessel (pure Rust)

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coo;
pub mod dense;
pub mod error;
pub mod index;
pub mod kernels;
pub mod scalar;

pub use coo::Coo;
pub use dense::{Dense, Layout};
pub use error::{KernelError, Result};
pub use index::IndexType;
pub use kernels::CooKernels;
pub use num_complex::Complex;
pub use num_traits::{One, Zero};
pub use scalar::Scalar;
