//! Help and completions specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .chime()
        .args(&["--help"])
        .passes()
        .stdout_has("clock")
        .stdout_has("completions");
}

#[test]
fn clock_help_lists_flags() {
    Project::empty()
        .chime()
        .args(&["clock", "--help"])
        .passes()
        .stdout_has("--ticks")
        .stdout_has("--log-file")
        .stdout_has("--quiet");
}

#[test]
fn completions_are_generated_for_bash() {
    Project::empty()
        .chime()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("chime");
}

#[test]
fn completions_ignore_a_broken_config() {
    let temp = Project::empty();
    temp.file("chime.toml", "not toml [");

    temp.chime().args(&["completions", "zsh"]).passes();
}
