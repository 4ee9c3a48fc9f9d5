use std::{fs, path::PathBuf, process::Command};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn maze_escape() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_maze-escape"));
    let _ = command.current_dir(workspace_root());
    command
}

#[test]
fn short_run_prints_banner_and_summary() {
    let output = maze_escape()
        .args(["--frames", "120", "--seed", "3"])
        .output()
        .expect("failed to run maze-escape");

    assert!(output.status.success(), "maze-escape exited with {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Maze Escape."));
    assert!(stdout.contains("outcome: Playing"));
    assert!(stdout.contains("score: -"));
}

#[test]
fn tiny_time_budget_ends_in_a_loss() {
    let config = std::env::temp_dir().join("maze-escape-short-timer.toml");
    fs::write(&config, "version = 1\n[timer]\nseconds = 1\n").expect("write config");

    let output = maze_escape()
        .args(["--frames", "500", "--config"])
        .arg(&config)
        .output()
        .expect("failed to run maze-escape");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("outcome: Lost"), "unexpected output:\n{stdout}");
    assert!(stdout.contains("time left: 00 : 00"));
}

#[test]
fn same_seed_produces_same_summary() {
    let run = || {
        maze_escape()
            .args(["--frames", "2000", "--seed", "11"])
            .output()
            .expect("failed to run maze-escape")
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn missing_map_fails_with_context() {
    let output = maze_escape()
        .args(["--map", "assets/maps/missing.json"])
        .output()
        .expect("failed to run maze-escape");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load map"));
}
