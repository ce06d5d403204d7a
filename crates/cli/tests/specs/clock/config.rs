//! Config file specs

use crate::prelude::*;

const FAST_CONFIG: &str = r#"
[clock]
interval_ms = 5
resolution_ms = 5
ticks = 2
"#;

#[test]
fn config_in_working_directory_is_used() {
    let temp = Project::empty();
    temp.file("chime.toml", FAST_CONFIG);

    temp.chime()
        .args(&["clock"])
        .passes()
        .stdout_has("Stopped after 2 ticks");
}

#[test]
fn explicit_config_path_is_used() {
    let temp = Project::empty();
    temp.file("conf/fast.toml", FAST_CONFIG);

    temp.chime()
        .args(&["--config", "conf/fast.toml", "clock"])
        .passes()
        .stdout_has("Stopped after 2 ticks");
}

#[test]
fn flags_override_the_config_file() {
    let temp = Project::empty();
    temp.file("chime.toml", FAST_CONFIG);

    temp.chime()
        .args(&["clock", "--ticks", "1"])
        .passes()
        .stdout_has("Stopped after 1 ticks");
}

#[test]
fn config_log_file_is_used() {
    let temp = Project::empty();
    temp.file(
        "chime.toml",
        &format!("{}\n[log]\nfile = \"ticks.log\"\n", FAST_CONFIG),
    );

    temp.chime().args(&["clock", "--quiet"]).passes();

    assert_eq!(temp.read("ticks.log").lines().count(), 2);
}

#[test]
fn invalid_config_fails() {
    let temp = Project::empty();
    temp.file("chime.toml", "[clock]\ninterval_ms = 0\n");

    temp.chime()
        .args(&["clock"])
        .fails()
        .stderr_has("clock.interval_ms");
}

#[test]
fn unknown_config_field_fails() {
    let temp = Project::empty();
    temp.file("chime.toml", "[clock]\nspeed = 2\n");

    temp.chime()
        .args(&["clock"])
        .fails()
        .stderr_has("TOML syntax error");
}

#[test]
fn missing_explicit_config_fails() {
    Project::empty()
        .chime()
        .args(&["--config", "nowhere.toml", "clock"])
        .fails()
        .stderr_has("nowhere.toml");
}
