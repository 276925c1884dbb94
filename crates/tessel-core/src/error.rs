//! Error types shared by the coordinate-format kernels

use thiserror::Error;

/// Result type alias using [`KernelError`]
pub type Result<T> = std::result::Result<T, KernelError>;

/// Errors reported synchronously by a kernel call.
///
/// Every variant is produced before the caller's output buffer is written,
/// so a failed call leaves that buffer unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Operand shapes are incompatible
    #[error("{op}: {what} dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Kernel that rejected the operands
        op: &'static str,
        /// Which operand or extent disagreed
        what: &'static str,
        /// Shape implied by the other operands
        expected: (usize, usize),
        /// Shape actually supplied
        got: (usize, usize),
    },

    /// A stored coordinate is negative or outside the declared shape
    #[error("{op}: index {index} at position {position} is outside [0, {bound})")]
    InvalidIndex {
        /// Kernel that met the index
        op: &'static str,
        /// Position of the offending entry in the triplet arrays
        position: usize,
        /// The offending index value
        index: i64,
        /// Exclusive upper bound for the index
        bound: usize,
    },

    /// An input violates a documented precondition
    #[error("{op}: precondition violated: {reason}")]
    Precondition {
        /// Kernel whose precondition failed
        op: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Malformed constructor input
    #[error("invalid parts: {0}")]
    InvalidParts(String),

    /// The selected backend does not provide this kernel
    #[error("Not implemented: {op}")]
    NotImplemented {
        /// Name of the missing kernel
        op: &'static str,
    },

    /// Internal scratch space could not be allocated
    #[error("Out of memory: failed to allocate {bytes} bytes of scratch space")]
    AllocationFailure {
        /// Requested size in bytes
        bytes: usize,
    },

    /// The worker thread pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl KernelError {
    /// Create a dimension mismatch error
    #[must_use]
    pub const fn dimension_mismatch(
        op: &'static str,
        what: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            op,
            what,
            expected,
            got,
        }
    }

    /// Create a precondition error
    pub fn precondition(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Precondition {
            op,
            reason: reason.into(),
        }
    }

    /// Create a not-implemented error
    #[must_use]
    pub const fn not_implemented(op: &'static str) -> Self {
        Self::NotImplemented { op }
    }
}
