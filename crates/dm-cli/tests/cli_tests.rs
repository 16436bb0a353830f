//! End-to-end tests for the dm-config binary

use assert_cmd::Command;
use dm_test_utils::TestSite;
use predicates::prelude::*;

/// Get a Command for the dm-config binary pinned to the `local` profile
fn dm_config(site: &TestSite) -> Command {
    let mut cmd = Command::cargo_bin("dm-config").unwrap();
    cmd.env_remove("DM_CONFIG")
        .env_remove("DM_SYSTEM")
        .arg("--config")
        .arg(site.config_path())
        .args(["--profile", "local"]);
    cmd
}

fn site_with_spins() -> TestSite {
    let mut site = TestSite::standard();
    site.add_project(
        "SPINS",
        "paths:\n  nii: niftis/\nExportSettings:\n  T1: []\nPipelineSettings_torun: [hcp]\n",
    );
    site.write();
    site
}

// ============================================================================
// paths
// ============================================================================

#[test]
fn test_paths_lists_every_tag() {
    let site = site_with_spins();
    let root = site.project_dir("SPINS");

    dm_config(&site)
        .args(["paths", "SPINS"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("dcm\t{root}data/dcm/")))
        .stdout(predicate::str::contains(format!("nii\t{root}niftis/")));
}

#[test]
fn test_paths_require_missing_tag_fails() {
    let site = site_with_spins();

    dm_config(&site)
        .args(["paths", "SPINS", "--require", "dcm", "--require", "meta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'meta' is not defined"));
}

#[test]
fn test_unknown_project_fails() {
    let site = site_with_spins();

    dm_config(&site)
        .args(["paths", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown project 'NOPE'"));
}

// ============================================================================
// export
// ============================================================================

#[test]
fn test_export_prints_formats() {
    let site = site_with_spins();

    dm_config(&site)
        .args(["export", "SPINS", "DTI"])
        .assert()
        .success()
        .stdout("nii\ndcm\n");
}

#[test]
fn test_export_disabled_and_unknown_series_print_nothing() {
    let site = site_with_spins();

    for series in ["T1", "UNKNOWN-SEQ"] {
        dm_config(&site)
            .args(["export", "SPINS", series])
            .assert()
            .success()
            .stdout("");
    }
}

// ============================================================================
// pipelines
// ============================================================================

#[test]
fn test_pipelines_in_order() {
    let site = site_with_spins();

    dm_config(&site)
        .args(["pipelines", "SPINS"])
        .assert()
        .success()
        .stdout("fmri\nhcp\n");
}

#[test]
fn test_pipelines_print_params_as_json() {
    let mut site = TestSite::standard();
    site.add_project(
        "SPINS",
        "PipelineSettings:\n  - name: fmri\n    params:\n      tr: 2\n  - hcp\n",
    );
    site.write();

    dm_config(&site)
        .args(["pipelines", "SPINS"])
        .assert()
        .success()
        .stdout("fmri\t{\"tr\":2}\nhcp\n");
}

#[test]
fn test_pipelines_to_run() {
    let site = site_with_spins();

    dm_config(&site)
        .args(["pipelines", "SPINS", "--to-run"])
        .assert()
        .success()
        .stdout("hcp\n");
}

// ============================================================================
// resolve / profiles
// ============================================================================

#[test]
fn test_resolve_json() {
    let site = site_with_spins();

    let output = dm_config(&site)
        .args(["resolve", "SPINS", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["project_id"], "SPINS");
    assert_eq!(json["profile"]["name"], "local");
    assert_eq!(json["effective_export_policy"]["T1"], serde_json::json!([]));
    assert_eq!(json["extra"]["LOGSERVER"], "logs.example.org");
}

#[test]
fn test_resolve_human_readable() {
    let site = site_with_spins();

    dm_config(&site)
        .args(["resolve", "SPINS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SPINS"))
        .stdout(predicate::str::contains("xnat.example.org"));
}

#[test]
fn test_unknown_profile_lists_available() {
    let site = site_with_spins();

    Command::cargo_bin("dm-config")
        .unwrap()
        .env_remove("DM_SYSTEM")
        .arg("--config")
        .arg(site.config_path())
        .args(["--profile", "cluster", "paths", "SPINS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("local, archive"));
}

#[test]
fn test_profiles_lists_declared_profiles() {
    let site = site_with_spins();

    dm_config(&site)
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("local"))
        .stdout(predicate::str::contains("archive"))
        .stdout(predicate::str::contains("/archive/data/"));
}

#[test]
fn test_profiles_with_unknown_profile_fails() {
    let site = site_with_spins();

    Command::cargo_bin("dm-config")
        .unwrap()
        .env_remove("DM_CONFIG")
        .env_remove("DM_SYSTEM")
        .arg("--config")
        .arg(site.config_path())
        .args(["--profile", "nope", "profiles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requested name 'nope'"))
        .stderr(predicate::str::contains("local, archive"));
}

#[test]
fn test_profiles_marks_requested_profile() {
    let site = site_with_spins();

    dm_config(&site)
        .env("NO_COLOR", "1")
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\*\s+local").unwrap());
}

#[test]
fn test_projects_lists_ids() {
    let site = site_with_spins();

    dm_config(&site)
        .arg("projects")
        .assert()
        .success()
        .stdout("SPINS\n");
}

#[test]
fn test_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("dm-config")
        .unwrap()
        .arg("--config")
        .arg(dir.path().join("missing.yml"))
        .args(["--profile", "local", "projects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Site configuration not found"));
}
