//! Simulated CPU work used to throttle agent threads
//!
//! Agents burn a little CPU before every step so that cars move at a
//! watchable wall-clock pace. In slow mode a car inside the intersection
//! burns far more, which keeps the permit held long enough to see the other
//! cars queue up. This is never a sleep: the thread stays runnable.

use std::hint::black_box;
use std::ops::RangeInclusive;

use rand::Rng;

/// Jitter drawn before each step
pub const DEFAULT_JITTER_UNITS: RangeInclusive<u32> = 2..=6;

/// Extra work per step while inside the intersection in slow mode
pub const DEFAULT_SLOW_UNITS: u32 = 19;

/// Throttling policy for agent threads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkThrottle {
    /// Tests turn this off to make agents run as fast as possible
    pub enabled: bool,
    pub jitter_units: RangeInclusive<u32>,
    pub slow_units: u32,
}

impl Default for WorkThrottle {
    fn default() -> Self {
        Self {
            enabled: true,
            jitter_units: DEFAULT_JITTER_UNITS,
            slow_units: DEFAULT_SLOW_UNITS,
        }
    }
}

impl WorkThrottle {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Random per-step work
    pub fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) {
        if !self.enabled {
            return;
        }
        let units = rng.random_range(self.jitter_units.clone());
        simulated_work(units);
    }

    /// Stall used inside the intersection while slow mode is on.
    /// Returns the units of work burned.
    pub fn stall(&self) -> u32 {
        if !self.enabled {
            return 0;
        }
        simulated_work(self.slow_units);
        self.slow_units
    }
}

/// Burn CPU time that grows exponentially with `units`.
///
/// Returns the Fibonacci number so the optimizer has to compute it.
pub fn simulated_work(units: u32) -> u64 {
    fn fib(n: u32) -> u64 {
        if n <= 2 {
            return 1;
        }
        black_box(fib(n - 1)) + fib(n - 2)
    }

    if units == 0 {
        return 0;
    }
    fib(black_box(units))
}
