mod common;

use common::{Scenario, TestProject};
use predicates::prelude::*;

fn status_json(project: &TestProject) -> serde_json::Value {
    let output = TestProject::cmd()
        .args(["--json", "status"])
        .arg(project.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn status_not_initialized() {
    let project = TestProject::new();

    TestProject::cmd()
        .arg("status")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not initialized"));

    let json = status_json(&project);
    assert_eq!(json["status"], "not_initialized");
    assert!(json.get("stats").is_none());
}

#[test]
fn status_after_init_is_empty() {
    let project = TestProject::new();
    project.init();

    let json = status_json(&project);
    assert_eq!(json["status"], "ready");
    assert_eq!(json["stats"]["total_venues"], 0);
    assert!(json["stats"]["last_search"].is_null());
}

#[test]
fn status_reflects_last_search() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);
    TestProject::cmd()
        .args(["--json", "search", "--location", "Toronto"])
        .arg(project.path())
        .assert()
        .success();

    let json = status_json(&project);
    assert_eq!(json["stats"]["total_venues"], 3);
    assert_eq!(json["stats"]["venues_with_keywords"], 2);
    assert_eq!(json["stats"]["last_location"], "Toronto");
    assert!(json["stats"]["last_search"].is_i64());

    TestProject::cmd()
        .arg("status")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Venues:        3"))
        .stdout(predicate::str::contains("Location:      Toronto"));
}
