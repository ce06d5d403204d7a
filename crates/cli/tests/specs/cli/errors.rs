//! CLI error specs

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    Project::empty()
        .chime()
        .args(&["chimes"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn zero_ticks_is_rejected() {
    Project::empty()
        .chime()
        .args(&["clock", "--ticks", "0"])
        .fails()
        .stderr_has("clock.ticks");
}

#[test]
fn unwritable_log_file_fails() {
    let temp = Project::empty();
    let path = temp.join("missing/dir/clock.log");

    temp.chime()
        .args(&["clock", "--ticks", "1", "--log-file", path.to_str().unwrap()])
        .args(FAST)
        .fails()
        .stderr_has("cannot open log file");
}
