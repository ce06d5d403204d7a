//! Clock run specs

use crate::prelude::*;

#[test]
fn clock_prints_each_tick_then_stops() {
    let out = Project::empty()
        .chime()
        .args(&["clock", "--ticks", "3"])
        .args(FAST)
        .passes()
        .stdout_has("Current Time: ")
        .stdout_has("Stopped after 3 ticks");

    let stdout = out.stdout();
    let ticks = stdout
        .lines()
        .filter(|line| line.starts_with("Current Time: "))
        .count();
    assert_eq!(ticks, 3);
}

#[test]
fn quiet_clock_prints_nothing() {
    let out = Project::empty()
        .chime()
        .args(&["clock", "--ticks", "2", "--quiet"])
        .args(FAST)
        .passes()
        .stdout_lacks("Current Time");

    assert!(out.stdout().is_empty());
}

#[test]
fn log_file_receives_every_tick() {
    let temp = Project::empty();
    let path = temp.join("clock.log");

    temp.chime()
        .args(&["clock", "--ticks", "2", "--quiet"])
        .args(&["--log-file", path.to_str().unwrap()])
        .args(FAST)
        .passes();

    let log = temp.read("clock.log");
    assert_eq!(log.lines().count(), 2);
    assert!(log.lines().all(|line| line.starts_with("Logging to file: ")));
}

#[test]
fn log_file_is_appended_across_runs() {
    let temp = Project::empty();
    temp.file("clock.log", "previous run\n");
    let path = temp.join("clock.log");

    temp.chime()
        .args(&["clock", "--ticks", "1", "--quiet"])
        .args(&["--log-file", path.to_str().unwrap()])
        .args(FAST)
        .passes();

    let log = temp.read("clock.log");
    assert!(log.starts_with("previous run\n"));
    assert_eq!(log.lines().count(), 2);
}

#[test]
fn trace_logging_goes_to_stderr() {
    Project::empty()
        .chime()
        .env("CHIME_LOG", "chime_core=info")
        .args(&["clock", "--ticks", "1", "--quiet"])
        .args(FAST)
        .passes()
        .stderr_has("ticker stopped");
}
