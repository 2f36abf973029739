//! CLI error handling specs
//!
//! Verify error messages for bad arguments and config files.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["launch"]).fails().code(2).stderr_has("unrecognized subcommand");
}

#[test]
fn bad_output_format_fails() {
    cli()
        .args(&["-o", "yaml", "session", "list"])
        .fails()
        .code(2)
        .stderr_has("invalid value 'yaml'");
}

#[test]
fn missing_config_file_fails() {
    cli()
        .args(&["--config", "/nonexistent/h5.toml", "session", "list"])
        .fails()
        .code(1)
        .stderr_has("Error: failed to read config /nonexistent/h5.toml");
}

#[test]
fn malformed_config_fails() {
    Config::new("[[sessions]\nid = 1\n")
        .h5()
        .args(&["session", "list"])
        .fails()
        .stderr_has("failed to parse config");
}

#[test]
fn unknown_config_key_fails() {
    Config::new("sessionz = []\n")
        .h5()
        .args(&["session", "list"])
        .fails()
        .stderr_has("unknown field");
}

#[test]
fn duplicate_seed_id_fails() {
    Config::new(
        "[[sessions]]\nid = \"a\"\nname = \"A\"\n\n[[sessions]]\nid = \"a\"\nname = \"B\"\n",
    )
    .h5()
    .args(&["session", "list"])
    .fails()
    .stderr_has("duplicate session id: a");
}

#[test]
fn unknown_active_seed_fails() {
    Config::new("active = \"ghost\"\n")
        .h5()
        .args(&["session", "list"])
        .fails()
        .stderr_has("session not found: ghost");
}

#[test]
fn h5_log_writes_to_stderr_only() {
    Config::dashboard()
        .h5()
        .env("H5_LOG", "debug")
        .args(&["session", "stats"])
        .passes()
        .stdout_eq("total:   3\nactive:  2\npaused:  1\nstopped: 0\n")
        .stderr_has("registry seeded");
}
