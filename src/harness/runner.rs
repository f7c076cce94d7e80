//! Browser test runner settings
//!
//! The runner serves the game locally and loads one fixture per test by
//! passing its name as the `test` query parameter. Specs share a single
//! viewport, so they always run serially.

use serde::Serialize;

use super::driver::{distance, is_position_close, GameDriver, PlayerPosition};
use crate::common::config::{HarnessConfig, RunnerConfig};
use crate::common::Result;
use crate::fixture::Fixture;

/// Effective settings for one runner invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerSettings {
    pub base_url: String,
    pub port: u16,
    pub serve_command: String,
    pub timeout_ms: u64,
    pub workers: u32,
    pub fully_parallel: bool,
    pub retries: u32,
    /// Fail the run if a focused-only test was committed
    pub forbid_only: bool,
    pub reuse_existing_server: bool,
    pub trace: String,
    pub screenshot: String,
    pub video: String,
}

impl RunnerSettings {
    /// Resolve settings for a CI or local run
    pub fn resolve(config: &RunnerConfig, ci: bool) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            port: config.port,
            serve_command: config.serve_command.clone(),
            timeout_ms: config.test_timeout_ms,
            workers: 1,
            fully_parallel: false,
            retries: if ci { config.ci_retries } else { 0 },
            forbid_only: ci,
            reuse_existing_server: !ci,
            trace: config.artifacts.trace.clone(),
            screenshot: config.artifacts.screenshot.clone(),
            video: config.artifacts.video.clone(),
        }
    }

    /// URL that loads the named fixture
    pub fn fixture_url(&self, name: &str) -> String {
        fixture_url(&self.base_url, name)
    }
}

/// `<base>/?test=<name>` with the name percent-encoded
pub fn fixture_url(base_url: &str, name: &str) -> String {
    format!(
        "{}/?test={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(name)
    )
}

/// Where the player ended up relative to the fixture's goal
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub position: PlayerPosition,
    /// Distance to the goal cell, if the fixture has one
    pub distance: Option<f64>,
    /// Within tolerance of the goal cell
    pub close: bool,
    /// The game's own goal flag
    pub goal_reached: bool,
}

/// Compare the live player position against the fixture goal
pub async fn check_arrival<D: GameDriver + ?Sized>(
    driver: &D,
    fixture: &Fixture,
    base_tolerance: f64,
) -> Result<Arrival> {
    let position = driver.player_position().await?;
    let goal_reached = driver.goal_reached().await?;

    let (distance, close) = match fixture.goal {
        Some(goal) => {
            let goal = PlayerPosition::from(goal);
            (
                Some(distance(position, goal)),
                is_position_close(position, goal, base_tolerance),
            )
        }
        None => (None, true),
    };

    tracing::debug!(fixture = %fixture.name, ?position, ?distance, goal_reached, "arrival");
    Ok(Arrival {
        position,
        distance,
        close,
        goal_reached,
    })
}

/// [`check_arrival`] with the configured base tolerance
pub async fn check_goal_arrival<D: GameDriver + ?Sized>(
    driver: &D,
    fixture: &Fixture,
    config: &HarnessConfig,
) -> Result<Arrival> {
    check_arrival(driver, fixture, config.base_tolerance).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[test]
    fn test_local_settings() {
        let settings = RunnerSettings::resolve(&RunnerConfig::default(), false);
        assert_eq!(settings.workers, 1);
        assert!(!settings.fully_parallel);
        assert_eq!(settings.retries, 0);
        assert!(!settings.forbid_only);
        assert!(settings.reuse_existing_server);
        assert_eq!(settings.trace, "on-first-retry");
    }

    #[test]
    fn test_ci_settings() {
        let settings = RunnerSettings::resolve(&RunnerConfig::default(), true);
        assert_eq!(settings.retries, 2);
        assert!(settings.forbid_only);
        assert!(!settings.reuse_existing_server);
    }

    #[test]
    fn test_fixture_url() {
        assert_eq!(
            fixture_url("http://localhost:8080/", "testDescendOneBlock"),
            "http://localhost:8080/?test=testDescendOneBlock"
        );
        assert_eq!(
            fixture_url("http://localhost:8080", "a b&c"),
            "http://localhost:8080/?test=a%20b%26c"
        );
    }

    struct Parked(PlayerPosition);

    #[async_trait]
    impl GameDriver for Parked {
        async fn is_ready(&self) -> Result<bool> {
            Ok(true)
        }
        async fn player_position(&self) -> Result<PlayerPosition> {
            Ok(self.0)
        }
        async fn goal_reached(&self) -> Result<bool> {
            Ok(false)
        }
        async fn key_down(&self, _key: &str) -> Result<()> {
            Ok(())
        }
        async fn key_up(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_check_arrival() {
        let fixture = crate::catalog::sample("testBasicMovement")
            .unwrap()
            .build_fixture()
            .unwrap();

        let near = Parked(PlayerPosition::new(1.6, 1.0, 0.2));
        let arrival = check_arrival(&near, &fixture, 1.0).await.unwrap();
        assert!(arrival.close);
        assert!(!arrival.goal_reached);

        let far = Parked(PlayerPosition::new(-2.0, 1.0, 0.0));
        let arrival = check_arrival(&far, &fixture, 1.0).await.unwrap();
        assert!(!arrival.close);
        assert_eq!(arrival.distance, Some(4.0));
    }

    #[tokio::test]
    async fn test_check_goal_arrival_uses_configured_tolerance() {
        let fixture = crate::catalog::sample("testBasicMovement")
            .unwrap()
            .build_fixture()
            .unwrap();
        let near = Parked(PlayerPosition::new(1.6, 1.0, 0.2));

        let arrival = check_goal_arrival(&near, &fixture, &HarnessConfig::default())
            .await
            .unwrap();
        assert!(arrival.close);

        let strict = HarnessConfig {
            base_tolerance: 0.1,
            ..HarnessConfig::default()
        };
        let arrival = check_goal_arrival(&near, &fixture, &strict).await.unwrap();
        assert!(!arrival.close);
    }
}
