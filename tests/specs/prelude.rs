//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing h5 CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;

/// Returns the path to a binary, checking the llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR points at a stale target directory.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>, so its
    // grandparent is target/debug/ where h5 is built.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Create a CLI builder for h5 commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
    /// Empty config home so a developer's own config never leaks in
    config_home: tempfile::TempDir,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![("NO_COLOR".into(), "1".into())],
            stdin: None,
            config_home: tempfile::tempdir().unwrap(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Feed `input` on stdin
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Build the command without running it
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(binary_path("h5"));
        cmd.args(&self.args);

        // Parent settings must not leak into specs.
        cmd.env_remove("H5_CONFIG");
        cmd.env_remove("H5_LOG");
        cmd.env_remove("COLOR");
        cmd.env("XDG_CONFIG_HOME", self.config_home.path());
        cmd.env("HOME", self.config_home.path());

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.write_stdin(self.stdin.clone().unwrap_or_default());
        cmd
    }

    fn output(&self) -> Output {
        self.command().output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert the process exit code
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.output.status.code(), Some(expected));
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }
}

// =============================================================================
// Config
// =============================================================================

/// Three sessions matching the dashboard's initial view.
pub const DASHBOARD_CONFIG: &str = r#"
game_url = "https://h5.stg.g123.jp/game/example"

[[sessions]]
id = "slime"
name = "遊戲分析"
players = 2
game_url = "https://slime.stg.g123-cpp.com/slime/index.html"

[[sessions]]
id = "resource"
name = "資源分析"
players = 1

[[sessions]]
id = "kumo"
name = "蜘蛛測試"
status = "paused"
players = 3
"#;

/// Temporary config file with helper methods.
pub struct Config {
    dir: tempfile::TempDir,
}

impl Config {
    pub fn new(content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), content).unwrap();
        Self { dir }
    }

    pub fn dashboard() -> Self {
        Self::new(DASHBOARD_CONFIG)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Run h5 with `--config` pointing at this file
    pub fn h5(&self) -> CliBuilder {
        let path = self.path();
        cli().args(&["--config", &path.to_string_lossy()])
    }
}
