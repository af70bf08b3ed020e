//! CLI and configuration rejection tests — no network I/O.
//!
//! These tests verify that configuration problems surface before any fetch
//! or publisher is attempted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("storefront").unwrap()
}

fn write_config(dir: &std::path::Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("storefront.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn fonts_dir() -> String {
    format!("{}/assets/fonts", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn missing_config_file_exits_with_error() {
    cmd()
        .args(["--config", "/nonexistent/storefront.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_toml_exits_with_error() {
    let dir = std::env::temp_dir().join("storefront_cli_badtoml");
    std::fs::create_dir_all(&dir).unwrap();
    let path = write_config(&dir, "not valid toml {{{");

    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_columns_is_rejected_before_fetch() {
    let dir = std::env::temp_dir().join("storefront_cli_zerocols");
    std::fs::create_dir_all(&dir).unwrap();
    let path = write_config(
        &dir,
        "[catalog]\nurl = \"https://api.example/store\"\n\n[store]\nname = \"Example\"\n\n[layout]\ncolumns = 0\n",
    );

    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("columns"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn enabled_publisher_without_credential_is_rejected_at_startup() {
    let dir = std::env::temp_dir().join("storefront_cli_nocred");
    std::fs::create_dir_all(&dir).unwrap();
    let config = format!(
        r#"[catalog]
url = "https://api.example/store"

[store]
name = "Example"

[layout]
font = "{fonts}/DejaVuSans.ttf"
font_bold = "{fonts}/DejaVuSans-Bold.ttf"

[publishers.forum]
enabled = true
base_url = "https://forum.example"
api_username = "bot"
"#,
        fonts = fonts_dir()
    );
    let path = write_config(&dir, &config);

    cmd()
        .args(["--config", path.to_str().unwrap()])
        .env_remove("STOREFRONT_FORUM_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("forum"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_font_is_rejected_at_startup() {
    let dir = std::env::temp_dir().join("storefront_cli_nofont");
    std::fs::create_dir_all(&dir).unwrap();
    let path = write_config(
        &dir,
        "[catalog]\nurl = \"https://api.example/store\"\n\n[store]\nname = \"Example\"\n\n[layout]\nfont = \"/nonexistent/font.ttf\"\n",
    );

    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("font"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn snapshot_and_record_snapshot_conflict() {
    cmd()
        .args(["--snapshot", "a.json", "--record-snapshot", "b.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
