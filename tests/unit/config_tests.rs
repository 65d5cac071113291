//! Unit tests for worker configuration parsing.

use std::path::PathBuf;

use evolve_clang_format::{AppError, WorkerConfig};

#[test]
fn empty_toml_uses_defaults() {
    let config = WorkerConfig::from_toml_str("").expect("parse");

    assert_eq!(config.formatter.binary, PathBuf::from("clang-format"));
    assert_eq!(config.formatter.fallback_style, "LLVM");
    assert!(config.formatter.assume_filename.is_none());
    assert!(!config.allow_missing_target);
}

#[test]
fn formatter_section_overrides_defaults() {
    let raw = r#"
allow_missing_target = true

[formatter]
binary = "/opt/llvm/bin/clang-format"
fallback_style = "Google"
assume_filename = "hint.cc"
"#;

    let config = WorkerConfig::from_toml_str(raw).expect("parse");

    assert_eq!(
        config.formatter.binary,
        PathBuf::from("/opt/llvm/bin/clang-format")
    );
    assert_eq!(config.formatter.fallback_style, "Google");
    assert_eq!(config.assume_filename(), "hint.cc");
    assert!(config.allow_missing_target);
}

#[test]
fn assume_filename_defaults_to_target_file_name() {
    let config = WorkerConfig::default().with_target("/work/src/widget.hpp");

    assert_eq!(config.assume_filename(), "widget.hpp");
}

#[test]
fn assume_filename_without_target_is_dev_null() {
    assert_eq!(WorkerConfig::default().assume_filename(), "/dev/null");
}

#[test]
fn target_is_never_read_from_toml() {
    // Unknown keys are ignored; the target stays unset.
    let config = WorkerConfig::from_toml_str("target = \"x.cpp\"").expect("parse");
    assert_eq!(config.target, PathBuf::new());
}

#[test]
fn empty_fallback_style_is_rejected() {
    let raw = "[formatter]\nfallback_style = \"  \"\n";

    let err = WorkerConfig::from_toml_str(raw).unwrap_err();

    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("fallback_style")));
}

#[test]
fn empty_binary_is_rejected() {
    let err = WorkerConfig::from_toml_str("[formatter]\nbinary = \"\"\n").unwrap_err();

    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("binary")));
}

#[test]
fn invalid_toml_is_config_error() {
    let err = WorkerConfig::from_toml_str("allow_missing_target = maybe").unwrap_err();

    assert!(err.to_string().starts_with("config:"));
}

#[test]
fn missing_file_is_config_error() {
    let err = WorkerConfig::load_from_path("/nonexistent/evolve.toml").unwrap_err();

    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("failed to read config")));
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("evolve.toml");
    std::fs::write(&path, "[formatter]\nfallback_style = \"Mozilla\"\n").expect("write");

    let config = WorkerConfig::load_from_path(&path).expect("load");

    assert_eq!(config.formatter.fallback_style, "Mozilla");
}
