#![forbid(unsafe_code)]

//! Fitness-evaluation worker for an evolutionary search over
//! `clang-format` configurations.
//!
//! The worker speaks line-delimited JSON-RPC 2.0 on stdio. Each
//! `evolve.measure` request formats a fixed target file with the candidate
//! configuration and reports how many normalised lines changed alongside
//! the configuration's option count.

pub mod catalog;
pub mod config;
pub mod diff;
pub mod errors;
pub mod fitness;
pub mod format;
pub mod protocol;

pub use config::WorkerConfig;
pub use errors::{AppError, Result};
