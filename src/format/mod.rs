//! Format adapter.
//!
//! The [`StyleFormatter`] trait isolates the fitness evaluator from the
//! concrete formatting engine. The shipped implementation,
//! [`clang::ClangFormat`], drives a `clang-format` executable over stdio;
//! tests substitute scripted formatters.

pub mod clang;

use std::future::Future;
use std::pin::Pin;

use crate::Result;

pub use clang::ClangFormat;

/// Capability interface for turning (style, source) into formatted source.
///
/// Source and output are raw bytes: target files are not required to be
/// valid UTF-8. The style is a fully self-contained serialized
/// configuration; implementations must not look for style files on disk.
pub trait StyleFormatter: Send + Sync {
    /// Reformat `source` according to the serialized `style`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StyleResolution`](crate::AppError::StyleResolution)
    /// when the style cannot be resolved, and
    /// [`AppError::ReplacementApplication`](crate::AppError::ReplacementApplication)
    /// when the engine cannot apply its edits.
    fn format<'a>(
        &'a self,
        style: &'a str,
        source: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}
