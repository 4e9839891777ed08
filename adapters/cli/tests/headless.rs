use std::process::Command;

fn run_headless(extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cat-chase"))
        .args(["--headless", "--seed", "42"])
        .args(extra)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run cat-chase binary")
}

#[test]
fn headless_run_prints_banner_and_summary() {
    let output = run_headless(&["--script", "RRDD LLUU X RR"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Cat Chase."));
    assert!(stdout.contains("Mice caught:"));
    assert!(stdout.contains("Games: 2 started"));
}

#[test]
fn headless_runs_with_the_same_seed_agree() {
    let script = ["--script", "RRRR DDDD LLLL UUUU RRDD"];
    let first = run_headless(&script);
    let second = run_headless(&script);

    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn invalid_script_fails_with_non_zero_status() {
    let output = run_headless(&["--script", "RRZ"]);

    assert!(!output.status.success());
}

#[test]
fn crowded_grid_is_rejected() {
    let output = run_headless(&["--columns", "2", "--rows", "2"]);

    assert!(!output.status.success());
}
