use assert_cmd::prelude::*;
use autograph::io::{import_layout, parse_matrix};
use std::fs;
use std::process::Command;
use std::sync::Arc;

const CROSSED: &str = "0,0,1\n0,1,0\n1,0,0\n";

#[test]
fn cli_missing_csv_exits_16() {
    let output = Command::cargo_bin("autograph")
        .expect("binary built")
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(16));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no CSV file provided"), "stderr: {stderr}");
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn cli_unreadable_csv_exits_16() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = Command::cargo_bin("autograph")
        .expect("binary built")
        .arg(tmp.path().join("nope.csv"))
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(16));
}

#[test]
fn cli_malformed_matrix_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let csv = tmp.path().join("bad.csv");
    fs::write(&csv, "1,0\n0,zz\n").expect("write fixture");

    let output = Command::cargo_bin("autograph")
        .expect("binary built")
        .arg(&csv)
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("`zz`"), "stderr: {stderr}");
}

#[test]
fn cli_help_exits_0() {
    let output = Command::cargo_bin("autograph")
        .expect("binary built")
        .arg("--help")
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {stdout}");
    assert!(stdout.contains("--n-specimen"), "stdout: {stdout}");
}

#[test]
fn cli_rejects_out_of_range_probability() {
    let output = Command::cargo_bin("autograph")
        .expect("binary built")
        .args(["-p", "101", "whatever.csv"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn cli_exports_reported_generations() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let csv = tmp.path().join("crossed.csv");
    fs::write(&csv, CROSSED).expect("write fixture");
    let out = tmp.path().join("dots");

    Command::cargo_bin("autograph")
        .expect("binary built")
        .arg(&csv)
        .args(["-n", "20", "-g", "6", "-o", "3", "--seed", "7", "--sequential"])
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success();

    let graph = Arc::new(parse_matrix(CROSSED).expect("fixture").to_graph());
    let first = fs::read_to_string(out.join("generation_0.dot")).expect("generation 0 exported");
    assert_eq!(import_layout(graph.clone(), &first).expect("importable").score(), 3);

    // Either every reported generation exists, or the run stopped early on a
    // perfect layout and exported that one last.
    let last = fs::read_dir(&out)
        .expect("out dir")
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            e.file_name()
                .to_str()?
                .strip_prefix("generation_")?
                .strip_suffix(".dot")?
                .parse::<usize>()
                .ok()
        })
        .max()
        .expect("at least one export");
    let text = fs::read_to_string(out.join(format!("generation_{last}.dot"))).expect("readable");
    let layout = import_layout(graph, &text).expect("importable");
    assert!(layout.score() < 3 || last == 6);
}

#[test]
fn cli_reports_the_exported_best() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let n = 12;
    let matrix: String = (0..n)
        .map(|i| {
            let row: Vec<&str> = (0..n).map(|j| if i + j == n - 1 { "1" } else { "0" }).collect();
            row.join(",") + "\n"
        })
        .collect();
    let csv = tmp.path().join("reversed.csv");
    fs::write(&csv, &matrix).expect("write fixture");
    let out = tmp.path().join("dots");

    let output = Command::cargo_bin("autograph")
        .expect("binary built")
        .arg(&csv)
        .args(["-n", "10", "-g", "40", "-p", "0", "-o", "0", "--seed", "0"])
        .args(["--random-retain", "--sequential", "--out-dir"])
        .arg(&out)
        .output()
        .expect("runs");
    assert!(output.status.success());

    // best score <S> after <G> generations (written to <path>)
    let stdout = String::from_utf8_lossy(&output.stdout);
    let words: Vec<&str> = stdout.split_whitespace().collect();
    let score: u64 = words[2].parse().expect("score");
    let generations: usize = words[4].parse().expect("generations");

    let graph = Arc::new(parse_matrix(&matrix).expect("fixture").to_graph());
    let text = fs::read_to_string(out.join(format!("generation_{generations}.dot")))
        .expect("final generation exported");
    assert_eq!(import_layout(graph, &text).expect("importable").score(), score);
}
