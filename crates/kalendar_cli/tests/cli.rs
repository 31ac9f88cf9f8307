//! End-to-end runs of the `kalendar` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const RAW: &str = "\
Март
13 Четвъртък
Св. Никифор
14 Петък
Св. Венедикт
15 Събота
Св. Агапий
";

fn kalendar(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kalendar"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn parse_moon_month_chain() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2025.txt"), RAW).unwrap();

    let out = kalendar(dir.path(), &["parse", "2025.txt", "feasts.tsv"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let out = kalendar(
        dir.path(),
        &["moon", "feasts.tsv", "moon.tsv", "--transitions", "off"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = fs::read_to_string(dir.path().join("moon.tsv")).unwrap();
    let friday = text.lines().find(|l| l.starts_with("2025-03-14")).unwrap();
    assert_eq!(friday, "2025-03-14\tСв. Венедикт\t\ttrue\ttrue\tfalse\t3");

    let out = kalendar(dir.path(), &["month", "moon.tsv", "3"]);
    assert!(out.status.success());
    let json = String::from_utf8(out.stdout).unwrap();
    assert!(json.contains("\"feast_name\": \"Св. Агапий\""));
    assert!(json.contains("\"moon_phase\": 3"));
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2025.txt"), RAW).unwrap();
    fs::write(dir.path().join("kalendar.toml"), "[io]\nquote_all = true\n").unwrap();

    let out = kalendar(dir.path(), &["parse", "2025.txt", "feasts.csv"]);
    assert!(out.status.success());
    let text = fs::read_to_string(dir.path().join("feasts.csv")).unwrap();
    assert_eq!(
        text.lines().nth(1),
        Some("\"2025-03-13\",\"Св. Никифор\",\"\",\"false\",\"true\",\"false\"")
    );
}

#[test]
fn phase_prints_every_algorithm() {
    let dir = tempfile::tempdir().unwrap();
    let out = kalendar(dir.path(), &["phase", "2025-03-14"]);
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.starts_with("2025-03-14"));
    for name in ["ephemeris", "approximation", "lunation"] {
        assert!(text.contains(name), "missing {name}");
    }
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = kalendar(dir.path(), &["parse", "nope.txt", "out.tsv"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error: failed to parse nope.txt"), "{stderr}");
    assert!(stderr.contains("file not found"));
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("kalendar.toml"), "[moon]\ntolerance = 0.5\n").unwrap();
    let out = kalendar(dir.path(), &["phase", "2025-01-01"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("failed to load configuration"), "{stderr}");
}
