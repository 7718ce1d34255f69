use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_gen_prange_solves() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args(["--gen", "--seed", "7", "--algo", "P", "--max-iterations", "500000", "30", "15", "4"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Solution found:"))
        .stdout(predicate::str::contains("Average number of iterations"));
}

#[test]
fn test_gen_lee_brickell_json_output() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args([
        "--gen",
        "--seed",
        "11",
        "--algo",
        "LB",
        "--p",
        "2",
        "--format",
        "json",
        "--max-iterations",
        "500000",
        "30",
        "15",
        "4",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"avg_iterations\""))
        .stdout(predicate::str::contains("\"solved\": 1"));
}

#[test]
fn test_gen_stern_dumer_with_l() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args([
        "--gen",
        "--seed",
        "13",
        "--algo",
        "SD",
        "--l",
        "8",
        "--p",
        "4",
        "--max-iterations",
        "500000",
        "40",
        "20",
        "4",
    ]);
    cmd.assert().success().stdout(predicate::str::contains("Solution found:"));
}

#[test]
fn test_file_input() {
    // tiny instance: H = (I | P), error on column 4 -> S = column 4 of H
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "# n\n8\n# w\n1\n# h^t (the identity part is omitted)\n1010\n0101\n1100\n0011\n# s^t\n1010\n"
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args(["--file", file.path().to_str().unwrap(), "--algo", "P", "--seed", "2"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("n=8, k=4, w=1"))
        .stdout(predicate::str::contains("Solution found:"));
}

#[test]
fn test_unknown_algorithm_fails() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args(["--gen", "--algo", "XX", "20", "10", "2"]);
    cmd.assert().failure().stderr(predicate::str::contains("unknown algorithm"));
}

#[test]
fn test_requires_file_or_gen() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("--file or --gen"));
}

#[test]
fn test_missing_file_fails() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args(["--file", "/nonexistent/challenge.txt"]);
    cmd.assert().failure().stderr(predicate::str::contains("could not open file"));
}

#[test]
fn test_trials_with_gen() {
    let mut cmd = Command::cargo_bin("isd-solver").unwrap();
    cmd.args([
        "--gen",
        "--seed",
        "19",
        "--trials",
        "3",
        "--max-iterations",
        "500000",
        "24",
        "12",
        "3",
    ]);
    cmd.assert().success().stdout(predicate::str::contains("Solved 3 of 3 trials"));
}
