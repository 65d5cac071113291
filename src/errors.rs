//! Error types shared across the worker.

use std::fmt::{Display, Formatter};

use tokio_util::codec::LinesCodecError;

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all worker failure modes.
///
/// Only an unknown JSON-RPC method is recovered (as an error response);
/// every variant here terminates the worker when it reaches `main`.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Malformed inbound line or missing required message field.
    Protocol(String),
    /// The candidate configuration could not be resolved into a style.
    StyleResolution(String),
    /// The formatting engine could not apply its computed edits.
    ReplacementApplication(String),
    /// The formatting engine could not be launched or returned unusable output.
    Formatter(String),
    /// The line-diff engine could not compare the two buffers.
    Diff(String),
    /// File-system or stdio failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Protocol(msg) => write!(f, "protocol: {msg}"),
            Self::StyleResolution(msg) => write!(f, "style resolution: {msg}"),
            Self::ReplacementApplication(msg) => write!(f, "replacement application: {msg}"),
            Self::Formatter(msg) => write!(f, "formatter: {msg}"),
            Self::Diff(msg) => write!(f, "diff: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(format!("malformed json: {err}"))
    }
}

impl From<LinesCodecError> for AppError {
    fn from(err: LinesCodecError) -> Self {
        match err {
            LinesCodecError::MaxLineLengthExceeded => Self::Protocol(format!(
                "line too long: inbound message exceeds {} bytes",
                crate::protocol::codec::MAX_LINE_BYTES
            )),
            LinesCodecError::Io(io_err) => io_err.into(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
