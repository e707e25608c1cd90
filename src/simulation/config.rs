//! Simulation settings

use std::time::Duration;

use super::layout::Viewport;
use super::work::WorkThrottle;

/// Control loop period, roughly 250 frames per second
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(4);

/// Everything needed to build a `SimWorld`
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub viewport: Viewport,
    /// Seed for reproducible layouts and speed draws
    pub seed: Option<u64>,
    pub throttle: WorkThrottle,
    /// Stop each agent after this many steps. `None` runs until cancelled.
    pub step_limit: Option<u64>,
    pub tick_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: None,
            throttle: WorkThrottle::default(),
            step_limit: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl SimConfig {
    /// Fast, reproducible configuration for tests
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            throttle: WorkThrottle::disabled(),
            ..Self::default()
        }
    }
}
