//! End-to-end offline cycle: replay a recorded snapshot, compose, save.
//!
//! Drives the binary with `--snapshot` and `--no-publish`, so the whole
//! fetch-compose-save path runs without any network access.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("storefront").unwrap()
}

fn fonts_dir() -> String {
    format!("{}/assets/fonts", env!("CARGO_MANIFEST_DIR"))
}

fn write_files(dir: &std::path::Path, entries_json: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    std::fs::create_dir_all(dir).unwrap();

    let config = format!(
        r#"[catalog]
url = "https://api.example/store"

[store]
name = "Example Game"

[layout]
font = "{fonts}/DejaVuSans.ttf"
font_bold = "{fonts}/DejaVuSans-Bold.ttf"
"#,
        fonts = fonts_dir()
    );
    let config_path = dir.join("storefront.toml");
    std::fs::write(&config_path, config).unwrap();

    let snapshot = format!(
        r#"{{"fetchedAt": "2026-08-06T08:00:00Z", "entries": [{entries_json}]}}"#
    );
    let snapshot_path = dir.join("snap.json");
    std::fs::write(&snapshot_path, snapshot).unwrap();

    (config_path, snapshot_path)
}

const SEVEN_ENTRIES: &str = r#"
{"id": "1", "name": "Alpha", "category": "Featured", "priceCents": 2400, "rarity": "epic"},
{"id": "2", "name": "Beta", "category": "Featured", "priceCents": 0},
{"id": "3", "name": "Gamma", "category": "Featured", "priceCents": 1200, "rarity": "rare"},
{"id": "4", "name": "Delta", "category": "Gear", "priceCents": 800},
{"id": "5", "name": "Epsilon", "category": "Gear", "priceCents": 1600, "rarity": "legendary"},
{"id": "6", "name": "Zeta", "category": "Gear", "priceCents": 2000},
{"id": "7", "name": "Eta", "category": "Emotes", "priceCents": 500, "rarity": "common"}
"#;

#[test]
fn replayed_snapshot_produces_an_image_and_exits_zero() {
    let dir = std::env::temp_dir().join("storefront_offline_run");
    let _ = std::fs::remove_dir_all(&dir);
    let (config_path, snapshot_path) = write_files(&dir, SEVEN_ENTRIES);
    let out_path = dir.join("store.png");

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--snapshot",
            snapshot_path.to_str().unwrap(),
            "--no-publish",
            "-o",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let png = std::fs::read(&out_path).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_snapshot_still_produces_an_image() {
    let dir = std::env::temp_dir().join("storefront_offline_empty");
    let _ = std::fs::remove_dir_all(&dir);
    let (config_path, snapshot_path) = write_files(&dir, "");
    let out_path = dir.join("store.png");

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--snapshot",
            snapshot_path.to_str().unwrap(),
            "--no-publish",
            "-o",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(out_path.is_file());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_snapshot_is_fatal() {
    let dir = std::env::temp_dir().join("storefront_offline_missing");
    let _ = std::fs::remove_dir_all(&dir);
    let (config_path, _) = write_files(&dir, "");

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--snapshot",
            "/nonexistent/snap.json",
            "--no-publish",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot"));

    let _ = std::fs::remove_dir_all(&dir);
}
