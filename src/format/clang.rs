//! `clang-format` subprocess adapter.
//!
//! Each call spawns the configured executable with the candidate style
//! passed inline through `--style`, feeds the source on stdin and reads
//! the reformatted text from stdout. JSON is valid YAML flow syntax, so the
//! serialized configuration is accepted verbatim.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::StyleFormatter;
use crate::config::WorkerConfig;
use crate::{AppError, Result};

/// Lowercased stderr prefixes `clang-format` emits when `-style` cannot be
/// resolved. The usage text also names `-style`, so bare mentions do not count.
const STYLE_FAILURE_MARKERS: &[&str] = &[
    "error parsing -style",
    "invalid value for -style",
    "yaml:",
];

/// Formatter backed by a `clang-format` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangFormat {
    binary: PathBuf,
    fallback_style: String,
    assume_filename: String,
}

impl ClangFormat {
    /// Create an adapter for an explicit executable.
    #[must_use]
    pub fn new(
        binary: impl Into<PathBuf>,
        fallback_style: impl Into<String>,
        assume_filename: impl Into<String>,
    ) -> Self {
        Self {
            binary: binary.into(),
            fallback_style: fallback_style.into(),
            assume_filename: assume_filename.into(),
        }
    }

    /// Create an adapter from worker configuration.
    #[must_use]
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(
            config.formatter.binary.clone(),
            config.formatter.fallback_style.clone(),
            config.assume_filename(),
        )
    }

    /// Command-line arguments for one invocation.
    fn args(&self, style: &str) -> [String; 3] {
        [
            format!("--style={style}"),
            format!("--fallback-style={}", self.fallback_style),
            format!("--assume-filename={}", self.assume_filename),
        ]
    }

    async fn run(&self, style: &str, source: &[u8]) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.binary)
            .args(self.args(style))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                AppError::Formatter(format!(
                    "failed to spawn {}: {err}",
                    self.binary.display()
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::Formatter("failed to capture formatter stdin".into()))?;

        // Feed stdin while draining stdout so large inputs cannot deadlock the pipes.
        let feed = async move {
            let written = stdin.write_all(source).await;
            drop(stdin);
            written
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let output = output
            .map_err(|err| AppError::Formatter(format!("failed to wait for formatter: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(status = ?output.status.code(), stderr = %stderr.trim(), "formatter failed");
            return Err(classify_failure(&stderr));
        }

        fed.map_err(|err| AppError::Formatter(format!("failed to write formatter input: {err}")))?;

        Ok(output.stdout)
    }
}

impl StyleFormatter for ClangFormat {
    fn format<'a>(
        &'a self,
        style: &'a str,
        source: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(self.run(style, source))
    }
}

/// Map a failed `clang-format` run onto the adapter's error taxonomy.
fn classify_failure(stderr: &str) -> AppError {
    let lowered = stderr.to_ascii_lowercase();
    let message = stderr.trim().to_owned();
    if STYLE_FAILURE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        AppError::StyleResolution(message)
    } else {
        AppError::ReplacementApplication(message)
    }
}
