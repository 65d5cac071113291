//! `diffy`-backed changed-line counter.

use diffy::{DiffOptions, Line};

use super::LineDiffer;
use crate::Result;

/// Counts changed lines with a zero-context Myers diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffyLineCounter;

impl DiffyLineCounter {
    /// Create a counter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineDiffer for DiffyLineCounter {
    fn count_changed_lines(&self, lhs: &[u8], rhs: &[u8]) -> Result<usize> {
        let mut options = DiffOptions::new();
        options.set_context_len(0);
        let patch = options.create_patch_bytes(lhs, rhs);

        let changed = patch
            .hunks()
            .iter()
            .flat_map(|hunk| hunk.lines())
            .filter(|line| matches!(line, Line::Insert(_) | Line::Delete(_)))
            .count();

        Ok(changed)
    }
}
