use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn guide(root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("guide");
    cmd.current_dir(root)
        .env("GUIDE_DIR", root.join("guide"))
        .env("GUIDE_CONFIG_PATH", root.join("guide.toml"))
        .env("GUIDE_HOME", root)
        .env_remove("GUIDE_CATEGORIES")
        .env_remove("RUST_LOG");
    cmd
}

fn seed(root: &Path) {
    let dir = root.join("guide");
    fs::create_dir_all(&dir).expect("mkdir guide");
    fs::write(
        dir.join("index.txt"),
        "Vogons|vogons.txt|Species\n\
         Earth|earth.txt|Planets\n\
         \n\
         Vogon Poetry|vogon_poetry.txt|Culture\n",
    )
    .expect("seed index");
    fs::write(dir.join("vogons.txt"), "Bureaucratic, officious, callous.").expect("vogons");
    fs::write(dir.join("earth.txt"), "Mostly harmless, apparently.").expect("earth");
}

#[test]
fn no_command_prints_help() {
    let tmp = tempdir().expect("tempdir");

    guide(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples:"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn unknown_command_prints_usage() {
    let tmp = tempdir().expect("tempdir");

    guide(tmp.path())
        .arg("teleport")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_groups_by_category() {
    let tmp = tempdir().expect("tempdir");
    seed(tmp.path());

    guide(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Culture:\n  • Vogon Poetry (vogon_poetry.txt)"))
        .stdout(predicate::str::contains("Total articles: 3"));
}

#[test]
fn search_joins_terms_and_ignores_case() {
    let tmp = tempdir().expect("tempdir");
    seed(tmp.path());

    guide(tmp.path())
        .args(["search", "VOGON", "POETRY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• Vogon Poetry"))
        .stdout(predicate::str::contains("• Vogons\n").not());
}

#[test]
fn view_prints_first_match_and_hides_missing_files() {
    let tmp = tempdir().expect("tempdir");
    seed(tmp.path());

    guide(tmp.path())
        .args(["view", "vogon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VOGONS"))
        .stdout(predicate::str::contains("Bureaucratic, officious, callous."));

    guide(tmp.path())
        .args(["view", "poetry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Article not found: poetry"));
}

#[test]
fn stats_reports_words_and_average() {
    let tmp = tempdir().expect("tempdir");
    seed(tmp.path());

    guide(tmp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total articles: 3"))
        .stdout(predicate::str::contains("Total words: 6"))
        .stdout(predicate::str::contains("Average words per article: 2"));
}

#[test]
fn json_flag_emits_report() {
    let tmp = tempdir().expect("tempdir");
    seed(tmp.path());

    let output = guide(tmp.path())
        .args(["--json", "search", "earth"])
        .output()
        .expect("run guide");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["command"], "search");
    assert_eq!(report["ok"], true);
    assert!(
        report["details"]
            .as_array()
            .expect("details")
            .iter()
            .any(|d| d == "• Earth")
    );
}
