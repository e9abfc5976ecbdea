#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/holidays.ics");

fn cli() -> Command {
    Command::cargo_bin("gamsung-cli").unwrap()
}

#[test]
fn holidays_for_month() {
    cli()
        .args(["holidays", "--year", "2025", "--month", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-10-08  추석 연휴 대체공휴일"))
        .stdout(predicate::str::contains("2025-09").not());
}

#[test]
fn holidays_json_output() {
    cli()
        .args(["holidays", "--year", "2025", "--month", "5", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"LUNAR\""))
        .stdout(predicate::str::contains("\"category\": \"COMMEMORATION\""));
}

#[test]
fn invalid_month_fails() {
    cli()
        .args(["holidays", "--year", "2025", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month must be within"));
}

#[test]
fn ics_from_local_file() {
    cli()
        .args(["ics", "--year", "2025", "--month", "3", "--ics-file", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-01  삼일절  [SOLAR, NATIONAL_DAY, public]"))
        .stdout(predicate::str::contains("2025-03-03  삼일절 대체공휴일"));
}

#[test]
fn places_add_export_import() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("places.json");
    let store = store.to_str().unwrap();
    let gpx = dir.path().join("out.gpx");
    let gpx = gpx.to_str().unwrap();

    cli()
        .args(["--places", store, "places", "add", "--name", "성산일출봉", "--note", "sunrise"])
        .args(["--lat", "33.4581", "--lng", "126.9426"])
        .assert()
        .success();

    cli()
        .args(["--places", store, "places", "export", "--out", gpx])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 place(s)"));

    cli()
        .args(["--places", store, "places", "import", "--file", gpx])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 place(s), skipped 0"));

    cli()
        .args(["--places", store, "places", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("성산일출봉 | sunrise | 33.4581,126.9426").count(2));
}

#[test]
fn places_add_rejects_bad_coordinates() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("places.json");
    cli()
        .args(["--places", store.to_str().unwrap(), "places", "add", "--name", "x"])
        .args(["--lat", "123", "--lng", "0"])
        .assert()
        .failure();
}
