//! Tests for file-backed document sources, base-directory resolution, and
//! marker files.
#![expect(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::Result;
use camino::Utf8PathBuf;
use serde_json::json;
use strata_config::{ConfigManager, StrataError};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture file");
    Utf8PathBuf::from_path_buf(path).expect("tempdir paths are UTF-8")
}

fn fixture_json() -> String {
    json!({
        "activeEnvironment": "prod",
        "environments": {
            "prod": {"appSettings": {"source": "file"}},
            "dev": {"appSettings": {"source": "file"}}
        }
    })
    .to_string()
}

#[test]
fn loads_documents_from_explicit_paths() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "cfg.json", &fixture_json());
    let manager = ConfigManager::builder().path(path).build()?;
    assert_eq!(manager.active_environment_name(), "prod");
    Ok(())
}

#[test]
fn resolves_named_sources_against_the_base_dir() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(&dir, "cfg.json", &fixture_json());
    let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8");
    let manager = ConfigManager::builder()
        .base_dir(base)
        .named("cfg.json")
        .build()?;
    assert_eq!(manager.active_environment_name(), "prod");
    Ok(())
}

#[test]
fn marker_file_overrides_document_nomination_and_is_trimmed() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(&dir, "cfg.json", &fixture_json());
    write_file(&dir, "environment.txt", "  dev\n");
    let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8");
    let manager = ConfigManager::builder()
        .base_dir(base)
        .named("cfg.json")
        .marker_file("environment.txt")
        .build()?;
    assert_eq!(manager.active_environment_name(), "dev");
    Ok(())
}

#[test]
fn missing_marker_file_contributes_no_marker() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(&dir, "cfg.json", &fixture_json());
    let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8");
    let manager = ConfigManager::builder()
        .base_dir(base)
        .named("cfg.json")
        .marker_file("environment.txt")
        .build()?;
    assert_eq!(manager.active_environment_name(), "prod");
    Ok(())
}

#[test]
fn unreadable_document_path_is_an_io_error() {
    let err = ConfigManager::builder()
        .path("definitely/not/here/cfg.json")
        .build()
        .unwrap_err();
    assert!(matches!(&*err, StrataError::Io { .. }));
}

#[test]
fn file_parse_failures_name_the_path() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "broken.json", "{not json");
    let err = ConfigManager::builder().path(path.clone()).build().unwrap_err();
    match &*err {
        StrataError::MalformedDocument { origin, .. } => {
            assert_eq!(origin, path.as_str());
        }
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
    Ok(())
}

#[test]
fn file_and_literal_sources_fold_in_order() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "cfg.json", &fixture_json());
    let overlay = json!({
        "environments": {"prod": {"appSettings": {"source": "inline"}}}
    })
    .to_string();
    let manager = ConfigManager::builder()
        .path(path)
        .literal(overlay)
        .build()?;
    let settings = manager.app_settings()?;
    assert_eq!(settings.get("source").map(String::as_str), Some("inline"));
    Ok(())
}
