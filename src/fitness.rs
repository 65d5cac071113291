//! Fitness evaluator for `evolve.measure`.
//!
//! Formats the target file with a candidate configuration, diffs the
//! original against the result at near-token granularity, and folds the
//! change count together with the configuration's size into two scores.
//! Both scores are non-positive; the harness maximises them, so fewer
//! changes win first and fewer options break ties.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::diff::LineDiffer;
use crate::format::StyleFormatter;
use crate::{AppError, Result};

/// Scores reported for one evaluated configuration.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// `-(option count + changed lines)`.
    pub plus_options: i64,
    /// `-(changed lines)`.
    pub change_count: i64,
}

impl Metrics {
    /// Combine an option count and a changed-line count into scores.
    #[must_use]
    pub fn from_counts(option_count: usize, changed_lines: usize) -> Self {
        Self {
            plus_options: negate(option_count.saturating_add(changed_lines)),
            change_count: negate(changed_lines),
        }
    }
}

fn negate(n: usize) -> i64 {
    i64::try_from(n).map_or(-i64::MAX, |v| -v)
}

/// `result` payload of an `evolve.measure` response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MeasureResult {
    /// Scores keyed by target file path.
    pub metrics: BTreeMap<String, Metrics>,
}

/// Insert a line break after every byte that is neither ASCII alphanumeric
/// nor a space.
///
/// Punctuation-dense source then diffs at roughly token granularity. The
/// transformation is byte-wise, so multi-byte UTF-8 sequences are split.
#[must_use]
pub fn add_newlines(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for &byte in text {
        out.push(byte);
        if !byte.is_ascii_alphanumeric() && byte != b' ' {
            out.push(b'\n');
        }
    }
    out
}

/// Number of leaf entries after fully flattening `value` into JSON pointers.
///
/// Scalars count one each. Empty objects and arrays also count one, since
/// they flatten to a single `null` entry at their own path.
#[must_use]
pub fn option_count(value: &Value) -> usize {
    match value {
        Value::Object(map) if map.is_empty() => 1,
        Value::Array(items) if items.is_empty() => 1,
        Value::Object(map) => map.values().map(option_count).sum(),
        Value::Array(items) => items.iter().map(option_count).sum(),
        _ => 1,
    }
}

/// Composes a formatter and a line differ into `evolve.measure` scores.
#[derive(Debug)]
pub struct FitnessEvaluator<F, D> {
    formatter: F,
    differ: D,
    target: PathBuf,
    allow_missing_target: bool,
}

impl<F, D> FitnessEvaluator<F, D>
where
    F: StyleFormatter,
    D: LineDiffer,
{
    /// Create an evaluator scoring `target`.
    pub fn new(formatter: F, differ: D, target: impl Into<PathBuf>) -> Self {
        Self {
            formatter,
            differ,
            target: target.into(),
            allow_missing_target: false,
        }
    }

    /// Score an unreadable target as empty content instead of failing.
    #[must_use]
    pub fn allow_missing_target(mut self, allow: bool) -> Self {
        self.allow_missing_target = allow;
        self
    }

    /// Path of the scored file.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Key under which metrics are reported.
    #[must_use]
    pub fn metrics_key(&self) -> String {
        self.target.to_string_lossy().into_owned()
    }

    /// Read the full target file as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` when the file cannot be read and missing
    /// targets are not allowed.
    pub async fn read_target(&self) -> Result<Vec<u8>> {
        match tokio::fs::read(&self.target).await {
            Ok(content) => Ok(content),
            Err(err) if self.allow_missing_target => {
                warn!(
                    path = %self.target.display(),
                    %err,
                    "target unreadable, scoring against empty content"
                );
                Ok(Vec::new())
            }
            Err(err) => Err(AppError::Io(format!(
                "failed to read target {}: {err}",
                self.target.display()
            ))),
        }
    }

    /// Evaluate one candidate configuration against the target file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StyleResolution` if `solution` is not an object or
    /// the formatter rejects it, and propagates read, format, and diff
    /// failures unchanged. No partial score is produced.
    pub async fn measure(&self, solution: &Value) -> Result<Metrics> {
        if !solution.is_object() {
            return Err(AppError::StyleResolution(
                "solution must be a json object".into(),
            ));
        }

        let content = self.read_target().await?;
        let style = solution.to_string();
        let formatted = self.formatter.format(&style, &content).await?;

        let changed = self
            .differ
            .count_changed_lines(&add_newlines(&content), &add_newlines(&formatted))?;
        let options = option_count(solution);

        debug!(
            solution = %style,
            formatted_bytes = formatted.len(),
            changed,
            options,
            "measured candidate"
        );

        Ok(Metrics::from_counts(options, changed))
    }

    /// Evaluate `solution` and wrap the scores in the response payload.
    ///
    /// # Errors
    ///
    /// See [`FitnessEvaluator::measure`].
    pub async fn measure_result(&self, solution: &Value) -> Result<MeasureResult> {
        let metrics = self.measure(solution).await?;
        Ok(MeasureResult {
            metrics: BTreeMap::from([(self.metrics_key(), metrics)]),
        })
    }
}
