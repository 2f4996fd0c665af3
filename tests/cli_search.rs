mod common;

use common::{Scenario, TestProject};
use predicates::prelude::*;

fn search_json(project: &TestProject) -> serde_json::Value {
    let output = TestProject::cmd()
        .args(["--json", "search", "--location", "Toronto"])
        .arg(project.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn search_json_output_structure() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    let json = search_json(&project);
    assert_eq!(json["location"], "Toronto");
    assert_eq!(json["lat"], 43.65);
    assert_eq!(json["stop"], "exhausted");
    assert_eq!(json["pages"], 2);
    assert_eq!(json["inserted"], 3);
    assert_eq!(json["count"], 3);

    let venues = json["venues"].as_array().unwrap();
    let names: Vec<&str> = venues.iter().map(|v| v["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Kissa Matcha Bar", "Leaf & Stone", "Corner Cafe"]);
    assert_eq!(venues[0]["keywords"], serde_json::json!(["creamy", "best", "best"]));
    assert_eq!(venues[1]["keywords"], serde_json::json!(["bitter", "sweet"]));
    assert_eq!(venues[2]["keywords"], serde_json::json!([]));
}

#[test]
fn search_follow_up_page_sends_only_token() {
    let (project, api) = TestProject::with_api(Scenario::TwoPages);
    search_json(&project);

    let queries = api.nearby_queries();
    assert_eq!(queries.len(), 2);

    let first = &queries[0];
    assert_eq!(first["location"], "43.65,-79.38");
    assert_eq!(first["radius"], "10000");
    assert_eq!(first["type"], "cafe");
    assert_eq!(first["keyword"], "matcha latte");
    assert_eq!(first["key"], "test-key");

    let second = &queries[1];
    assert_eq!(second.len(), 2);
    assert_eq!(second["pagetoken"], "page-2");
    assert_eq!(second["key"], "test-key");
}

#[test]
fn search_with_coordinates_skips_geocoding() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    let output = TestProject::cmd()
        .args(["--json", "search", "--lat", "43.7", "--lon", "-79.4"])
        .arg(project.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["location"], "43.7,-79.4");
    assert_eq!(json["count"], 3);
}

#[test]
fn search_interactive_filters_and_rolls_back() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    TestProject::cmd()
        .args(["search", "--location", "Toronto"])
        .arg(project.path())
        .write_stdin("1\nbitter\n2\n4.0\n3\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 cafés (3 new)"))
        .stdout(predicate::str::contains("Keywords: creamy and best"))
        .stdout(predicate::str::contains("1 matching cafés"))
        .stdout(predicate::str::contains("Rating filter back to 1.0"))
        .stdout(predicate::str::contains("Filters reset."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn search_prompts_for_location() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    TestProject::cmd()
        .arg("search")
        .arg(project.path())
        .write_stdin("Toronto\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please enter the city you would like to search",
        ))
        .stdout(predicate::str::contains("Kissa Matcha Bar"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn search_unrecognized_option_reprompts() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    TestProject::cmd()
        .args(["search", "--location", "Toronto"])
        .arg(project.path())
        .write_stdin("7\n2\nhigh\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unrecognized option: '7'"))
        .stdout(predicate::str::contains("'high' is not a number."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn search_no_interactive_prints_and_exits() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    TestProject::cmd()
        .args(["search", "--location", "Toronto", "--no-interactive"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Corner Cafe"))
        .stdout(predicate::str::contains("Filter options").not());
}

#[test]
fn search_zero_results_is_informational() {
    let (project, _api) = TestProject::with_api(Scenario::ZeroResults);

    TestProject::cmd()
        .args(["search", "--location", "Toronto"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There are unfortunately no cafés serving matcha latte in your area",
        ));
}

#[test]
fn search_denied_status_fails() {
    let (project, _api) = TestProject::with_api(Scenario::Denied);

    TestProject::cmd()
        .args(["search", "--location", "Toronto", "--no-interactive"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("REQUEST_DENIED"));
}

#[test]
fn search_unknown_location_fails() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    TestProject::cmd()
        .args(["search", "--location", "Atlantis", "--no-interactive"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to geocode 'Atlantis'"));
}

#[test]
fn search_repeated_keeps_first_records() {
    let (project, _api) = TestProject::with_api(Scenario::TwoPages);

    assert_eq!(search_json(&project)["inserted"], 3);
    let again = search_json(&project);
    assert_eq!(again["inserted"], 0);
    assert_eq!(again["count"], 3);
}

#[test]
fn search_without_init_fails() {
    let project = TestProject::new();

    TestProject::cmd()
        .args(["search", "--location", "Toronto"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}
