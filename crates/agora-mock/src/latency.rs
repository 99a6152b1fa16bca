//! Simulated network latency for the mock services

use std::thread;
use std::time::Duration;

/// Optional artificial delay applied before each service call.
///
/// A zero-millisecond latency is stored as `None` so that `simulate`
/// never touches the clock in the common test configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latency(Option<Duration>);

impl Latency {
    /// No artificial delay
    pub fn none() -> Self {
        Self(None)
    }

    /// Delay of the given number of milliseconds; 0 disables
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Self(None)
        } else {
            Self(Some(Duration::from_millis(ms)))
        }
    }

    /// Block the current thread for the configured delay, if any
    pub fn simulate(&self) {
        if let Some(delay) = self.0 {
            thread::sleep(delay);
        }
    }

    /// Whether any delay is configured
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_millis_is_disabled() {
        assert!(!Latency::from_millis(0).is_enabled());
        assert!(!Latency::none().is_enabled());
    }

    #[test]
    fn test_nonzero_millis_is_enabled() {
        assert!(Latency::from_millis(5).is_enabled());
    }

    #[test]
    fn test_simulate_with_no_delay_returns_immediately() {
        let start = std::time::Instant::now();
        Latency::none().simulate();
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
