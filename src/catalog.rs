//! Compiled-in style catalog.
//!
//! Holds the seed presets offered to the harness through `evolve.populate`
//! and the parameter template returned by `evolve.template`. Both are
//! embedded at build time and parsed at most once per process.

use std::sync::LazyLock;

use serde_json::Value;

use crate::{AppError, Result};

/// A named, immutable starting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Base style label.
    pub name: &'static str,
    /// Serialized configuration object.
    pub source: &'static str,
}

impl Preset {
    /// Parse the serialized configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the embedded source is not a JSON object.
    pub fn to_value(&self) -> Result<Value> {
        let value: Value = serde_json::from_str(self.source).map_err(|err| {
            AppError::Config(format!("preset {} is not valid json: {err}", self.name))
        })?;
        if !value.is_object() {
            return Err(AppError::Config(format!(
                "preset {} must be a json object",
                self.name
            )));
        }
        Ok(value)
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "LLVM",
        source: include_str!("../assets/presets/llvm.json"),
    },
    Preset {
        name: "Google",
        source: include_str!("../assets/presets/google.json"),
    },
    Preset {
        name: "Chromium",
        source: include_str!("../assets/presets/chromium.json"),
    },
    Preset {
        name: "Mozilla",
        source: include_str!("../assets/presets/mozilla.json"),
    },
    Preset {
        name: "WebKit",
        source: include_str!("../assets/presets/webkit.json"),
    },
    Preset {
        name: "Microsoft",
        source: include_str!("../assets/presets/microsoft.json"),
    },
    Preset {
        name: "GNU",
        source: include_str!("../assets/presets/gnu.json"),
    },
];

const TEMPLATE_SOURCE: &str = include_str!("../assets/template.json");

static SOLUTIONS: LazyLock<std::result::Result<Vec<Value>, String>> = LazyLock::new(|| {
    PRESETS
        .iter()
        .map(|preset| preset.to_value().map_err(|err| err.to_string()))
        .collect()
});

static TEMPLATE: LazyLock<std::result::Result<Value, String>> =
    LazyLock::new(|| serde_json::from_str(TEMPLATE_SOURCE).map_err(|err| err.to_string()));

/// All presets in catalog order.
#[must_use]
pub fn presets() -> &'static [Preset] {
    PRESETS
}

/// Parsed preset configurations in catalog order, as sent in `evolve.populate`.
///
/// # Errors
///
/// Returns `AppError::Config` if any embedded preset fails to parse.
pub fn solutions() -> Result<&'static [Value]> {
    SOLUTIONS
        .as_deref()
        .map_err(|err| AppError::Config(err.clone()))
}

/// The parameter template returned by `evolve.template`.
///
/// # Errors
///
/// Returns `AppError::Config` if the embedded template fails to parse.
pub fn template() -> Result<&'static Value> {
    TEMPLATE
        .as_ref()
        .map_err(|err| AppError::Config(format!("template is not valid json: {err}")))
}
