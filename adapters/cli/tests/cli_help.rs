use std::process::Command;

#[test]
fn help_lists_play_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_cat-chase"))
        .arg("--help")
        .output()
        .expect("failed to run cat-chase binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--config",
        "--columns",
        "--rows",
        "--mice",
        "--houses",
        "--seed",
        "--script",
        "--headless",
    ] {
        assert!(stdout.contains(flag), "--help is missing {flag}:\n{stdout}");
    }
}

#[test]
fn unknown_flag_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_cat-chase"))
        .arg("--lives")
        .output()
        .expect("failed to run cat-chase binary");

    assert!(!output.status.success());
}
