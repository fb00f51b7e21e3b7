use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_quakeglobe"))
}

#[test]
fn help_mentions_the_binary() {
    let out = bin().arg("--help").output().expect("run --help");
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("quakeglobe"));
    assert!(text.contains("play"));
    assert!(text.contains("demo"));
}

#[test]
fn version_prints_and_exits_cleanly() {
    let out = bin().arg("--version").output().expect("run --version");
    assert!(out.status.success());
}

#[test]
fn unknown_subcommand_fails_without_panicking() {
    let out = bin().arg("frobnicate").output().expect("run bad subcommand");
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(!err.contains("panicked"));
}

#[test]
fn missing_catalog_file_is_a_clean_error() {
    // Catalog loading happens before the terminal is touched, so this is
    // safe to run without a TTY.
    let out = bin()
        .args(["play", "/nonexistent/quakes.json"])
        .output()
        .expect("run play");
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("quakeglobe:"));
}
