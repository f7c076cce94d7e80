//! Game driver contract and polling helpers
//!
//! The browser automation itself lives outside this crate. A driver only has
//! to answer a few questions about the page's global game handle and press
//! keys; the waiting, tolerance and timeout logic is implemented here once.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout};

use crate::common::config::HarnessConfig;
use crate::common::{Error, Result};
use crate::fixture::{Fixture, InputToken};

/// Live player position as reported by the game (not grid-aligned)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PlayerPosition {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<crate::fixture::Position> for PlayerPosition {
    fn from(pos: crate::fixture::Position) -> Self {
        Self::new(f64::from(pos.x), f64::from(pos.y), f64::from(pos.z))
    }
}

/// Access to a running game page
#[async_trait]
pub trait GameDriver: Send + Sync {
    /// Whether the scene, player and position handles all exist
    async fn is_ready(&self) -> Result<bool>;

    /// Current player position
    async fn player_position(&self) -> Result<PlayerPosition>;

    /// The game's own goal check
    async fn goal_reached(&self) -> Result<bool>;

    /// Press and hold a key
    async fn key_down(&self, key: &str) -> Result<()>;

    /// Release a key
    async fn key_up(&self, key: &str) -> Result<()>;
}

/// Poll until the game is ready, then wait the settle delay.
pub async fn wait_for_game_ready<D: GameDriver + ?Sized>(
    driver: &D,
    config: &HarnessConfig,
) -> Result<()> {
    let poll = Duration::from_millis(config.poll_interval_ms);
    let ready = timeout(Duration::from_millis(config.ready_timeout_ms), async {
        loop {
            if driver.is_ready().await? {
                return Ok::<(), Error>(());
            }
            sleep(poll).await;
        }
    })
    .await;

    match ready {
        Ok(result) => result?,
        Err(_) => return Err(Error::NotReady(config.ready_timeout_ms)),
    }

    tracing::debug!(settle_ms = config.settle_ms, "game ready, settling");
    sleep(Duration::from_millis(config.settle_ms)).await;
    Ok(())
}

/// Whether the game reports the player standing on the goal
pub async fn is_player_at_goal<D: GameDriver + ?Sized>(driver: &D) -> Result<bool> {
    driver.goal_reached().await
}

/// Euclidean distance between two positions
pub fn distance(a: PlayerPosition, b: PlayerPosition) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Whether `a` and `b` are within `max(base_tolerance, 5% of their distance)`
pub fn is_position_close(a: PlayerPosition, b: PlayerPosition, base_tolerance: f64) -> bool {
    let d = distance(a, b);
    let tolerance = base_tolerance.max(d * 0.05);
    d <= tolerance
}

/// Hold `key` for `duration`
pub async fn press_key_for_duration<D: GameDriver + ?Sized>(
    driver: &D,
    key: &str,
    duration: Duration,
) -> Result<()> {
    driver.key_down(key).await?;
    sleep(duration).await;
    driver.key_up(key).await
}

/// Hold every key of `token` together for `duration`
pub async fn press_input<D: GameDriver + ?Sized>(
    driver: &D,
    token: InputToken,
    duration: Duration,
) -> Result<()> {
    let keys = token.keys();
    for key in &keys {
        driver.key_down(key).await?;
    }
    sleep(duration).await;
    for key in keys.iter().rev() {
        driver.key_up(key).await?;
    }
    Ok(())
}

/// Press a fixture's expected inputs one after another.
///
/// Built fixtures only hold valid tokens; anything else is a driver error.
pub async fn replay_inputs<D: GameDriver + ?Sized>(
    driver: &D,
    fixture: &Fixture,
    hold: Duration,
) -> Result<()> {
    for raw in &fixture.expected_inputs {
        let token = InputToken::parse(raw)
            .ok_or_else(|| Error::Driver(format!("Cannot replay input {:?}", raw)))?;
        tracing::debug!(input = %token, "pressing");
        press_input(driver, token, hold).await?;
    }
    Ok(())
}

/// Wait for the player to move. Returns `false` when `limit` passes first.
pub async fn wait_for_position_change<D: GameDriver + ?Sized>(
    driver: &D,
    limit: Duration,
    poll: Duration,
) -> Result<bool> {
    let start = driver.player_position().await?;

    let changed = timeout(limit, async {
        loop {
            let current = driver.player_position().await?;
            if current != start {
                return Ok::<(), Error>(());
            }
            sleep(poll).await;
        }
    })
    .await;

    match changed {
        Ok(result) => result.map(|()| true),
        Err(_) => {
            tracing::debug!(?start, "position unchanged before timeout");
            Ok(false)
        }
    }
}

/// [`wait_for_position_change`] with the configured timeout and poll interval
pub async fn wait_for_player_move<D: GameDriver + ?Sized>(
    driver: &D,
    config: &HarnessConfig,
) -> Result<bool> {
    wait_for_position_change(
        driver,
        Duration::from_millis(config.position_change_timeout_ms),
        Duration::from_millis(config.poll_interval_ms),
    )
    .await
}
