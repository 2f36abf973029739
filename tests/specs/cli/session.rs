//! `h5 session` specs
//!
//! Verify listing, detail, and stats for configured sessions.

use crate::prelude::*;

#[test]
fn list_without_config_is_empty() {
    cli()
        .args(&["session", "list"])
        .passes()
        .stdout_eq("No sessions\n");
}

#[test]
fn list_shows_seeds_in_config_order() {
    Config::dashboard()
        .h5()
        .args(&["session", "list"])
        .passes()
        .stdout_eq(
            "   ID        NAME  STATUS  PLAYERS  ELAPSED\n\
             *  slime     遊戲分析  active        2  0:00\n   \
             resource  資源分析  active        1  0:00\n   \
             kumo      蜘蛛測試  paused        3  0:00\n",
        );
}

#[test]
fn config_active_key_selects_session() {
    let config = Config::new(&format!("active = \"kumo\"\n{}", DASHBOARD_CONFIG));
    config
        .h5()
        .args(&["session", "show"])
        .passes()
        .stdout_has("Session: kumo\n")
        .stdout_has("  Status:   paused (暫停)\n");
}

#[test]
fn h5_config_env_is_used() {
    let config = Config::dashboard();
    cli()
        .env("H5_CONFIG", config.path())
        .args(&["session", "stats"])
        .passes()
        .stdout_eq("total:   3\nactive:  2\npaused:  1\nstopped: 0\n");
}

#[test]
fn config_flag_beats_env() {
    let flagged = Config::new("[[sessions]]\nid = \"only\"\nname = \"Only\"\n");
    let env = Config::dashboard();
    flagged
        .h5()
        .env("H5_CONFIG", env.path())
        .args(&["session", "stats"])
        .passes()
        .stdout_has("total:   1\n");
}

#[test]
fn show_defaults_to_first_seed() {
    Config::dashboard()
        .h5()
        .args(&["session", "show"])
        .passes()
        .stdout_has("Session: slime\n")
        .stdout_has("  Name:     遊戲分析\n")
        .stdout_has("  Game URL: https://slime.stg.g123-cpp.com/slime/index.html\n")
        .stdout_has("  Active:   yes\n");
}

#[test]
fn show_unknown_id_fails() {
    Config::dashboard()
        .h5()
        .args(&["session", "show", "ghost"])
        .fails()
        .code(1)
        .stderr_eq("Error: session not found: ghost\n");
}

#[test]
fn show_on_empty_registry_fails() {
    cli()
        .args(&["session", "show"])
        .fails()
        .stderr_eq("Error: no active session\n");
}

#[test]
fn list_json() {
    let run = Config::dashboard()
        .h5()
        .args(&["session", "list", "-o", "json"])
        .passes();
    let value = run.json();
    let sessions = value.as_array().unwrap();

    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["id"], "slime");
    assert_eq!(sessions[0]["game_url"], "https://slime.stg.g123-cpp.com/slime/index.html");
    assert_eq!(sessions[1]["game_url"], serde_json::Value::Null);
    assert_eq!(sessions[2]["status"], "paused");
}

#[test]
fn stopped_seed_is_counted() {
    Config::new("[[sessions]]\nid = \"old\"\nname = \"Old\"\nstatus = \"stopped\"\n")
        .h5()
        .args(&["session", "stats", "-o", "json"])
        .passes()
        .stdout_has("\"stopped\": 1");
}
