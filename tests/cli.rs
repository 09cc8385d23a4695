use assert_cmd::Command;
use predicates::prelude::predicate::str;

fn input_path(name: &str) -> String {
    format!("{}/tests/inputs/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn collect_with_four_entrances() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("four_entrances.txt"));

    cmd.assert().success().stdout(str::contains(
        "It takes at least 8 steps for 4 collectors to collect all 4 key(s).",
    ));
}

#[test]
fn collect_in_large_vault() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("large.txt"));

    cmd.assert()
        .success()
        .stdout(str::contains("It takes at least 72 steps"));
}

#[test]
fn collect_with_split_entrance() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("splittable.txt")).arg("--split-entrance");

    cmd.assert()
        .success()
        .stdout(str::contains("It takes at least 8 steps"));
}

#[test]
fn collect_from_stdin() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.write_stdin(std::fs::read_to_string(input_path("single_entrance.txt")).unwrap());

    cmd.assert()
        .success()
        .stdout(str::contains("It takes at least 8 steps"));
}

#[test]
fn report_no_way_to_collect() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("locked.txt"));

    cmd.assert().success().stderr(str::contains(
        "There's no way for 4 collectors to collect all keys in given vault.",
    ));
}

#[test]
fn report_exhausted_budget() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("large.txt")).arg("--max-states").arg("0");

    cmd.assert().success().stderr(str::contains(
        "Gave up after expanding 0 search states without collecting all keys.",
    ));
}

#[test]
fn fail_on_wrong_entrance_count() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("two_entrances.txt"));

    cmd.assert()
        .failure()
        .stderr(str::contains("Expect 1 or 4 entrance(s) in map, given 2."));
}

#[test]
fn fail_on_unsplittable_entrance() {
    let mut cmd = Command::cargo_bin("collect").unwrap();
    cmd.arg(input_path("single_entrance.txt"))
        .arg("--split-entrance");

    cmd.assert()
        .failure()
        .stderr(str::contains("Can't split entrance at (3, 3)"));
}
