//! `h5 demo` specs

use crate::prelude::*;

#[test]
fn demo_leaves_one_active_session() {
    let run = cli().args(&["demo"]).passes();
    let stdout = run.stdout();

    assert!(stdout.contains("(Game Test #1)"));
    assert!(stdout.contains("(Game Test #2)"));
    assert!(stdout.contains("Deleted session-"));
    let marked: Vec<&str> = stdout.lines().filter(|l| l.starts_with('*')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("Game Test #1"));
    assert!(!stdout.lines().any(|l| l.contains("Game Test #2") && l.contains("active")));
}

#[test]
fn demo_ignores_config() {
    Config::dashboard()
        .h5()
        .args(&["demo", "-o", "json"])
        .passes()
        .stdout_lacks("slime");
}

#[test]
fn demo_json() {
    let run = cli().args(&["-o", "json", "demo"]).passes();
    let value = run.json();

    assert_eq!(value["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(value["sessions"][0]["name"], "Game Test #1");
    assert_eq!(value["active"], value["created"][0]);
    assert_ne!(value["deleted"], value["active"]);
}
