//! End-to-end harness support
//!
//! Helpers for driving a fixture in the browser through a [`GameDriver`],
//! and the settings the browser test runner is launched with.

mod driver;
mod runner;

pub use driver::{
    distance, is_player_at_goal, is_position_close, press_input, press_key_for_duration,
    replay_inputs, wait_for_game_ready, wait_for_player_move, wait_for_position_change, GameDriver,
    PlayerPosition,
};
pub use runner::{check_arrival, check_goal_arrival, fixture_url, Arrival, RunnerSettings};
