//! Text diff adapter.
//!
//! [`LineDiffer`] counts the lines a zero-context diff reports as added or
//! removed between two buffers. Buffers are compared as raw bytes, so
//! content that looks binary is still diffed line by line.

pub mod counter;

use crate::Result;

pub use counter::DiffyLineCounter;

/// Capability interface for the line-diff engine.
pub trait LineDiffer: Send + Sync {
    /// Count added plus removed lines between `lhs` and `rhs`.
    ///
    /// Unchanged lines never contribute to the count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Diff`](crate::AppError::Diff) if the comparison
    /// cannot be computed. [`DiffyLineCounter`] always succeeds; the
    /// evaluator still propagates failures from other engines unchanged.
    fn count_changed_lines(&self, lhs: &[u8], rhs: &[u8]) -> Result<usize>;
}
