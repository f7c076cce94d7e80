//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Browser test runner settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Polling and tolerance settings for the game driver helpers
    #[serde(default)]
    pub harness: HarnessConfig,

    /// Where generated fixtures go
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings handed to the browser test runner
#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    /// URL the game is served from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Port of the local web server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Command that serves the game locally
    #[serde(default = "default_serve_command")]
    pub serve_command: String,

    /// Per-test timeout
    #[serde(default = "default_test_timeout")]
    pub test_timeout_ms: u64,

    /// Retries for failed tests in CI; local runs never retry
    #[serde(default = "default_ci_retries")]
    pub ci_retries: u32,

    /// Artifact capture policy
    #[serde(default)]
    pub artifacts: ArtifactPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            port: default_port(),
            serve_command: default_serve_command(),
            test_timeout_ms: default_test_timeout(),
            ci_retries: default_ci_retries(),
            artifacts: ArtifactPolicy::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_serve_command() -> String {
    "python -m http.server 8080".to_string()
}
fn default_test_timeout() -> u64 {
    30_000
}
fn default_ci_retries() -> u32 {
    2
}

/// When to keep traces, screenshots and videos
#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactPolicy {
    #[serde(default = "default_trace")]
    pub trace: String,
    #[serde(default = "default_screenshot")]
    pub screenshot: String,
    #[serde(default = "default_video")]
    pub video: String,
}

impl Default for ArtifactPolicy {
    fn default() -> Self {
        Self {
            trace: default_trace(),
            screenshot: default_screenshot(),
            video: default_video(),
        }
    }
}

fn default_trace() -> String {
    "on-first-retry".to_string()
}
fn default_screenshot() -> String {
    "only-on-failure".to_string()
}
fn default_video() -> String {
    "retain-on-failure".to_string()
}

/// Timeouts in milliseconds plus position tolerance
#[derive(Debug, Deserialize, Clone)]
pub struct HarnessConfig {
    /// How long to wait for the game handles to appear
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout_ms: u64,

    /// Extra delay after the game reports ready
    #[serde(default = "default_settle")]
    pub settle_ms: u64,

    /// Default wait for the player to move
    #[serde(default = "default_position_change_timeout")]
    pub position_change_timeout_ms: u64,

    /// Delay between polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Absolute distance under which two positions count as equal
    #[serde(default = "default_base_tolerance")]
    pub base_tolerance: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            ready_timeout_ms: default_ready_timeout(),
            settle_ms: default_settle(),
            position_change_timeout_ms: default_position_change_timeout(),
            poll_interval_ms: default_poll_interval(),
            base_tolerance: default_base_tolerance(),
        }
    }
}

fn default_ready_timeout() -> u64 {
    10_000
}
fn default_settle() -> u64 {
    500
}
fn default_position_change_timeout() -> u64 {
    3_000
}
fn default_poll_interval() -> u64 {
    50
}
fn default_base_tolerance() -> f64 {
    1.0
}

/// Output settings
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory generated fixtures are written to
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: default_fixtures_dir(),
        }
    }
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("test-maps")
}

const TEMPLATE: &str = r#"# voxtest configuration

[runner]
base_url = "http://localhost:8080"
port = 8080
serve_command = "python -m http.server 8080"
test_timeout_ms = 30000
# retries only apply when CI is set
ci_retries = 2

[runner.artifacts]
trace = "on-first-retry"
screenshot = "only-on-failure"
video = "retain-on-failure"

[harness]
ready_timeout_ms = 10000
settle_ms = 500
position_change_timeout_ms = 3000
poll_interval_ms = 50
base_tolerance = 1.0

[output]
fixtures_dir = "test-maps"
"#;

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| super::Error::file_read(&path, e))?;
                return Self::parse(&content);
            }
        }
        Ok(Self::default())
    }

    /// Commented configuration file with every default spelled out
    pub fn template() -> &'static str {
        TEMPLATE
    }

    /// Parse configuration TOML
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.runner.base_url, "http://localhost:8080");
        assert_eq!(config.runner.test_timeout_ms, 30_000);
        assert_eq!(config.harness.ready_timeout_ms, 10_000);
        assert_eq!(config.harness.settle_ms, 500);
        assert_eq!(config.output.fixtures_dir, PathBuf::from("test-maps"));
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
[runner]
base_url = "http://127.0.0.1:9000"

[harness]
base_tolerance = 0.25
"#,
        )
        .unwrap();
        assert_eq!(config.runner.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.runner.port, 8080);
        assert_eq!(config.harness.base_tolerance, 0.25);
        assert_eq!(config.runner.artifacts.video, "retain-on-failure");
    }

    #[test]
    fn test_template_matches_defaults() {
        let config = Config::parse(Config::template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.runner.base_url, defaults.runner.base_url);
        assert_eq!(config.runner.ci_retries, defaults.runner.ci_retries);
        assert_eq!(config.harness.poll_interval_ms, defaults.harness.poll_interval_ms);
        assert_eq!(config.output.fixtures_dir, defaults.output.fixtures_dir);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::parse("[runner]\nport = \"x\""),
            Err(super::super::Error::ConfigParse(_))
        ));
    }
}
