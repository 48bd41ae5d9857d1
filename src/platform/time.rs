//! Clocks
//!
//! The simulation never reads time itself; the driver samples a `Clock`
//! once per tick and passes the reading in.

use std::time::Duration;

/// Monotonic time source plus wall-clock timestamps for the score ledger
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Unix timestamp in milliseconds
    fn unix_millis(&self) -> f64;
}

/// Real time
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
}

impl SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {
            start_ms: performance_now(),
        }
    }
}

/// `performance.now()`, monotonic unlike `Date.now()`
#[cfg(target_arch = "wasm32")]
fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Duration {
        Duration::from_secs_f64(((performance_now() - self.start_ms) / 1000.0).max(0.0))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn unix_millis(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    #[cfg(target_arch = "wasm32")]
    fn unix_millis(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Manually advanced clock for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    elapsed: Duration,
    /// Wall-clock time at the origin
    epoch_ms: f64,
}

impl VirtualClock {
    pub fn new(epoch_ms: f64) -> Self {
        Self {
            elapsed: Duration::ZERO,
            epoch_ms,
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn unix_millis(&self) -> f64 {
        self.epoch_ms + self.elapsed.as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_clock() {
        let mut clock = VirtualClock::new(1_000.0);
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(500));
        assert_eq!(clock.unix_millis(), 1_500.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(clock.unix_millis() > 0.0);
    }
}
