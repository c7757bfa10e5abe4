//! Random pacing between automated actions.

use rand::Rng;
use sleuth_core::PacingConfig;
use std::time::Duration;

/// Uniform random integer in `[0, max)`. A `max` of zero yields zero.
#[must_use]
pub fn random_delay(max: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    rand::thread_rng().gen_range(0..max)
}

/// Random delay source bound to the configured maximum.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    max_delay_ms: u64,
}

impl Pacer {
    /// Create a pacer with an explicit maximum delay in milliseconds.
    #[must_use]
    pub fn new(max_delay_ms: u64) -> Self {
        Self { max_delay_ms }
    }

    /// Configured maximum delay in milliseconds (exclusive).
    #[must_use]
    pub fn max_delay_ms(&self) -> u64 {
        self.max_delay_ms
    }

    /// Random delay in `[0, max_delay_ms)` milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        random_delay(self.max_delay_ms)
    }

    /// Random delay with an explicit bound instead of the configured one.
    #[must_use]
    pub fn delay_ms_up_to(&self, max: u64) -> u64 {
        random_delay(max)
    }

    /// Sleep for a random delay and return how long it slept.
    pub async fn pause(&self) -> Duration {
        let delay = Duration::from_millis(self.delay_ms());
        tokio::time::sleep(delay).await;
        delay
    }
}

impl From<&PacingConfig> for Pacer {
    fn from(config: &PacingConfig) -> Self {
        Self::new(config.max_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_delay_in_bounds() {
        for _ in 0..1000 {
            assert!(random_delay(50) < 50);
        }
    }

    #[test]
    fn test_random_delay_max_one_is_zero() {
        for _ in 0..100 {
            assert_eq!(random_delay(1), 0);
        }
    }

    #[test]
    fn test_random_delay_max_zero() {
        assert_eq!(random_delay(0), 0);
    }

    #[test]
    fn test_random_delay_varies() {
        let samples: Vec<u64> = (0..50).map(|_| random_delay(1_000_000)).collect();
        assert!(samples.iter().any(|s| *s != samples[0]));
    }

    #[test]
    fn test_pacer_uses_configured_max() {
        let pacer = Pacer::from(&PacingConfig { max_delay_ms: 10 });
        assert_eq!(pacer.max_delay_ms(), 10);
        for _ in 0..200 {
            assert!(pacer.delay_ms() < 10);
        }
        assert_eq!(pacer.delay_ms_up_to(1), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_within_bound() {
        let pacer = Pacer::new(500);
        let started = tokio::time::Instant::now();
        let slept = pacer.pause().await;

        assert!(slept < Duration::from_millis(500));
        assert!(started.elapsed() >= slept);
    }
}
