//! Tick cadence for the match lifecycle

use std::time::Duration;

/// Tick rate the host engine drives the process at
pub const TICKS_PER_SECOND: u32 = 20;
/// Duration of a single host tick in milliseconds
pub const TICK_MILLIS: u64 = 1_000 / TICKS_PER_SECOND as u64;

/// Ticks between two countdown steps (one step per second)
pub const COUNTDOWN_STEP_TICKS: u32 = 20;
/// Seconds a lobby countdown runs before the match enters preparation
pub const COUNTDOWN_SECONDS: u32 = 20;

/// Wall-clock period between countdown steps
pub fn countdown_period() -> Duration {
    Duration::from_millis(TICK_MILLIS * COUNTDOWN_STEP_TICKS as u64)
}
