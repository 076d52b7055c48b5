//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end against fixture asset trees.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test.
fn cellframe() -> Command {
    let mut cmd = Command::cargo_bin("cellframe").unwrap();
    cmd.env_remove("CELLFRAME_STATIC_ROOT").env_remove("CELLFRAME_BASE").env_remove("CELLFRAME_ROOT");
    cmd
}

/// Static tree with every built-in plugin's primary script, plus a config
/// file pointing at it.
fn fixture() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();

    for file in [
        "static/datatables/js/jquery.dataTables.min.js",
        "static/datatables/css/jquery.dataTables.min.css",
        "static/d3/js/d3.min.js",
        "static/c3/js/c3.min.js",
        "static/pivot/js/pivot.min.js",
        "static/pivot/js/c3_renderers.min.js",
        "static/selectize/js/selectize.min.js",
    ] {
        temp.child(file).write_str("/* bundle */").unwrap();
    }

    temp.child("data.json").write_str(r#"{"columns": ["x", "y"], "rows": [[1, 2], [3, 4]]}"#).unwrap();

    let config = format!(
        "[assets]\nstatic_root = {:?}\ndeployment_root = {:?}\n",
        temp.path().join("static").display().to_string(),
        temp.path().join("deploy").display().to_string(),
    );
    temp.child("cellframe.toml").write_str(&config).unwrap();

    temp
}

fn with_config(temp: &assert_fs::TempDir) -> Command {
    let mut cmd = cellframe();
    cmd.current_dir(temp.path()).arg("--config").arg(temp.path().join("cellframe.toml"));
    cmd
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    cellframe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabular data visualisation"));
}

#[test]
fn test_version_flag() {
    cellframe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Plugin Commands
// ============================================================================

#[test]
fn test_plugins_lists_builtins() {
    let temp = fixture();

    with_config(&temp)
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("/nbextensions/cellframe/pivot/js/pivot.min.js"))
        .stdout(predicate::str::contains("Total: 5 plugins"));
}

#[test]
fn test_install_copies_assets() {
    let temp = fixture();

    with_config(&temp).arg("install").assert().success().stdout(predicate::str::contains("Installed 5 plugins"));

    temp.child("deploy/nbextensions/cellframe/pivot/js/c3_renderers.min.js").assert(predicate::path::is_file());
    temp.child("deploy/nbextensions/cellframe/datatables/css/jquery.dataTables.min.css")
        .assert(predicate::path::is_file());
}

#[test]
fn test_install_to_explicit_root() {
    let temp = fixture();

    with_config(&temp).args(["install", "--root"]).arg(temp.path().join("other")).assert().success();

    temp.child("other/nbextensions/cellframe/d3/js/d3.min.js").assert(predicate::path::is_file());
    temp.child("deploy").assert(predicate::path::missing());
}

#[test]
fn test_missing_static_resource_fails() {
    let temp = fixture();
    std::fs::remove_file(temp.path().join("static/c3/js/c3.min.js")).unwrap();

    with_config(&temp)
        .arg("plugins")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing static js resources from c3/js: c3.min.js"));
}

#[test]
fn test_enable_prints_loader_config() {
    let temp = fixture();

    with_config(&temp)
        .arg("enable")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""shim":{"pivot":{"deps":["jquery","jqueryui","d3","c3"]}"#));
}

// ============================================================================
// Render Commands
// ============================================================================

#[test]
fn test_pivot_with_raw_option() {
    let temp = fixture();

    with_config(&temp)
        .args(["pivot", "data.json", "--label", "x=Ex", "--raw", "renderers=$.pivotUtilities.c3_renderers"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"element.pivotUI([["Ex","y"],[1,2],[3,4]], {"renderers":$.pivotUtilities.c3_renderers});"#,
        ));
}

#[test]
fn test_pivot_null_options_is_empty_object() {
    let temp = fixture();

    with_config(&temp)
        .args(["pivot", "data.json", "--options", "null"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"element.pivotUI([["x","y"],[1,2],[3,4]], {});"#));
}

#[test]
fn test_pivot_array_options_rejected() {
    let temp = fixture();

    with_config(&temp)
        .args(["pivot", "data.json", "--options", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid options"))
        .stderr(predicate::str::contains("Failed to read").not());
}

#[test]
fn test_table_options_from_file() {
    let temp = fixture();
    temp.child("options.json").write_str(r#"{"pageLength": 5}"#).unwrap();

    with_config(&temp)
        .args(["table", "data.json", "--options", "options.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pageLength":5"#));
}

#[test]
fn test_table_json_format() {
    let temp = fixture();

    with_config(&temp)
        .args(["table", "data.json", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("application/javascript"));
}

#[test]
fn test_table_rejects_bad_label() {
    let temp = fixture();

    with_config(&temp).args(["table", "data.json", "--label", "nolabel"]).assert().failure();
}

#[test]
fn test_table_reads_stdin() {
    let temp = fixture();

    with_config(&temp)
        .args(["table", "-"])
        .write_stdin(r#"[{"city": "Oslo", "temp": -3}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""columns":[{"title":"city"},{"title":"temp"}]"#));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    cellframe().args(["completions", "bash"]).assert().success().stdout(predicate::str::contains("cellframe"));
}
