use std::process::{Command, Output};

fn run_headless(extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args([
            "--ticks",
            "60",
            "--tick-ms",
            "1",
            "--seed",
            "7",
            "--no-throttle",
            "--report-every",
            "20",
        ])
        .args(extra)
        .env("RUST_LOG", "warn,intersection_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Value logged after `label`, e.g. "Total collisions: 4"
fn logged_value(stderr: &str, label: &str) -> u64 {
    let line = stderr
        .lines()
        .rev()
        .find(|line| line.contains(label))
        .unwrap_or_else(|| panic!("Could not find '{}' line", label));
    let parts: Vec<&str> = line.split(label).collect();
    parts
        .get(1)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| panic!("Could not parse value from line: {}", line))
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&[]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that the summary statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_headless(&[]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for label in [
        "Ticks:",
        "Total collisions:",
        "Intersection acquisitions:",
        "Peak intersection holders:",
        "Intersection held by:",
    ] {
        assert!(stderr.contains(label), "Missing '{}' statistic", label);
    }

    assert_eq!(logged_value(&stderr, "Ticks:"), 60);
    assert!(logged_value(&stderr, "Peak intersection holders:") <= 1);
}

/// Test that the ASCII map is drawn with the intersection outline
#[test]
fn test_map_is_drawn() {
    let output = run_headless(&[]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("##########"), "No intersection outline in map");
    assert!(stderr.contains("--- After tick 20 ---"));
}

/// Unknown keys are ignored, not fatal
#[test]
fn test_unknown_key_is_ignored() {
    let output = run_headless(&["--key", "q", "--key", "s"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ignoring unknown key"));
    assert!(stderr.contains("SIMULATION COMPLETE"));
}

/// Escape before start exits cleanly without running
#[test]
fn test_escape_quits_before_start() {
    let output = run_headless(&["--key", "escape"]);
    assert!(output.status.success(), "Simulation failed to exit cleanly");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Quit requested before start"));
    assert!(!stderr.contains("SIMULATION COMPLETE"));
}

/// Absurd viewport sizes are rejected before any map is allocated
#[test]
fn test_oversized_viewport_fails() {
    let output = run_headless(&["--width", "4000000000"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to set up the simulation"));
    assert!(!stderr.contains("SIMULATION COMPLETE"));
}

/// Asking for the UI without the feature is an error
#[cfg(not(feature = "ui"))]
#[test]
fn test_ui_without_feature_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .arg("--ui")
        .output()
        .expect("Failed to execute simulation");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("UI feature is not enabled"));
}
