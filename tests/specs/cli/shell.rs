//! `h5 shell` specs
//!
//! Verify script execution, error reporting, and exit codes.

use crate::prelude::*;

#[test]
fn json_output_is_one_document_per_command() {
    let run = cli()
        .args(&["shell", "-o", "json"])
        .stdin("create Game Test #1\ncreate Game Test #2\nlist\n")
        .passes();

    let stdout = run.stdout();
    let docs: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&stdout)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(docs.len(), 3);

    let first = docs[0]["id"].as_str().unwrap();
    let second = docs[1]["id"].as_str().unwrap();
    assert_ne!(first, second);
    assert!(first.starts_with("session-"));
    assert_eq!(docs[1]["status"], "active");
    assert_eq!(docs[2].as_array().unwrap().len(), 2);
}

#[test]
fn deleting_active_session_selects_first_seed() {
    Config::dashboard()
        .h5()
        .args(&["shell"])
        .stdin("delete slime\nshow\n")
        .passes()
        .stdout_has("Deleted slime\n")
        .stdout_has("Session: resource\n");
}

#[test]
fn pause_resume_and_dup_on_seeds() {
    Config::dashboard()
        .h5()
        .args(&["shell"])
        .stdin("# toggle kumo\nresume kumo\npause slime\n\ndup resource\nstats\n")
        .passes()
        .stdout_has("kumo is active\n")
        .stdout_has("slime is paused\n")
        .stdout_has("Duplicated resource as session-")
        .stdout_has("(資源分析 (copy))\n")
        .stdout_has("total:   4\nactive:  3\npaused:  1\n");
}

#[test]
fn failed_commands_exit_one_after_running_everything() {
    Config::dashboard()
        .h5()
        .args(&["shell"])
        .stdin("delete ghost\ncreate   \ndelete kumo\nstats\n")
        .fails()
        .code(1)
        .stderr_eq(
            "error: session not found: ghost\n\
             error: invalid session: session name must not be empty\n",
        )
        .stdout_has("Deleted kumo\n")
        .stdout_has("total:   2\n");
}

#[test]
fn unknown_command_is_reported() {
    cli()
        .args(&["shell"])
        .stdin("launch\n")
        .fails()
        .stderr_eq("error: unknown command: launch (try `help`)\n");
}

#[test]
fn script_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("steps.h5");
    std::fs::write(&script, "create From File\nlist\n").unwrap();

    cli()
        .args(&["shell", "--script", &script.to_string_lossy()])
        .passes()
        .stdout_has("From File");
}

#[test]
fn missing_script_file_fails() {
    cli()
        .args(&["shell", "--script", "/nonexistent/steps.h5"])
        .fails()
        .stderr_has("failed to open script /nonexistent/steps.h5");
}

#[test]
fn analysis_completes_on_wait() {
    Config::dashboard()
        .h5()
        .args(&["shell"])
        .stdin("analyze slime 20\nanalyze resource 10\nwait\n")
        .passes()
        .stdout_eq(
            "Analyzing slime (20 ms)\n\
             Analyzing resource (10 ms)\n\
             Analysis complete: resource\n\
             Analysis complete: slime\n",
        );
}

#[test]
fn deleted_session_never_completes_analysis() {
    Config::dashboard()
        .h5()
        .args(&["shell"])
        .stdin("analyze kumo 10\ndelete kumo\nwait\n")
        .passes()
        .stdout_lacks("Analysis complete")
        .stdout_has("No running analyses\n");
}
