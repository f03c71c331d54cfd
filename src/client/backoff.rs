use std::time::Duration;

pub const DEFAULT_FLOOR: Duration = Duration::from_millis(10_000);
pub const DEFAULT_CEILING: Duration = Duration::from_millis(120_000);
pub const DEFAULT_GROWTH: f64 = 1.8;

/// Poll interval that grows geometrically on failure and snaps back on success.
#[derive(Debug, Clone)]
pub struct Backoff {
    floor: Duration,
    ceiling: Duration,
    growth: f64,
    current: Duration,
    failures: u32,
}

impl Backoff {
    /// A floor of zero is raised to one millisecond, and the ceiling is never
    /// below the floor.
    pub fn new(floor: Duration, ceiling: Duration, growth: f64) -> Self {
        let floor = floor.max(Duration::from_millis(1));
        let ceiling = ceiling.max(floor);
        let growth = if growth.is_finite() && growth >= 1.0 {
            growth
        } else {
            DEFAULT_GROWTH
        };

        Self {
            floor,
            ceiling,
            growth,
            current: floor,
            failures: 0,
        }
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    pub fn floor(&self) -> Duration {
        self.floor
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    /// Consecutive failures since the last success.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn on_success(&mut self) -> Duration {
        self.failures = 0;
        self.current = self.floor;
        self.current
    }

    /// Grow the interval and return the delay before the next attempt.
    pub fn on_failure(&mut self) -> Duration {
        self.failures = self.failures.saturating_add(1);

        // min(floor * growth^k, ceiling), rounded once to whole milliseconds
        let exponent = i32::try_from(self.failures).unwrap_or(i32::MAX);
        let grown = as_millis_f64(self.floor) * self.growth.powi(exponent);
        let capped = grown.min(as_millis_f64(self.ceiling)).round();
        self.current = Duration::from_millis(capped as u64);
        self.current
    }
}

fn as_millis_f64(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR, DEFAULT_CEILING, DEFAULT_GROWTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(d: Duration) -> u128 {
        d.as_millis()
    }

    #[test]
    fn test_starts_at_floor() {
        let backoff = Backoff::default();
        assert_eq!(millis(backoff.current()), 10_000);
        assert_eq!(backoff.failures(), 0);
    }

    #[test]
    fn test_three_failures_grow_geometrically() {
        let mut backoff = Backoff::default();
        let delays: Vec<u128> = (0..3).map(|_| millis(backoff.on_failure())).collect();
        assert_eq!(delays, vec![18_000, 32_400, 58_320]);
        assert_eq!(backoff.failures(), 3);
    }

    #[test]
    fn test_growth_is_capped_at_ceiling() {
        let mut backoff = Backoff::default();
        for _ in 0..4 {
            backoff.on_failure();
        }
        assert_eq!(millis(backoff.current()), 104_976);
        assert_eq!(millis(backoff.on_failure()), 120_000);
        assert_eq!(millis(backoff.on_failure()), 120_000);
    }

    #[test]
    fn test_matches_closed_form() {
        let mut backoff = Backoff::default();
        for k in 1..=10 {
            let expected = (10_000.0 * 1.8f64.powi(k)).round().min(120_000.0) as u128;
            assert_eq!(millis(backoff.on_failure()), expected, "after {} failures", k);
        }
    }

    #[test]
    fn test_closed_form_holds_for_odd_floor() {
        let mut backoff = Backoff::new(
            Duration::from_millis(1001),
            Duration::from_millis(120_000),
            1.8,
        );
        for k in 1..=12 {
            let expected = (1001.0 * 1.8f64.powi(k)).min(120_000.0).round() as u128;
            assert_eq!(millis(backoff.on_failure()), expected, "after {} failures", k);
        }
        assert_eq!(millis(backoff.current()), 120_000);
    }

    #[test]
    fn test_many_failures_stay_at_ceiling() {
        let mut backoff = Backoff::default();
        for _ in 0..10_000 {
            backoff.on_failure();
        }
        assert_eq!(millis(backoff.current()), 120_000);
    }

    #[test]
    fn test_success_resets_to_floor() {
        let mut backoff = Backoff::default();
        backoff.on_failure();
        backoff.on_failure();
        assert_eq!(millis(backoff.on_success()), 10_000);
        assert_eq!(backoff.failures(), 0);
        assert_eq!(millis(backoff.on_failure()), 18_000);
    }

    #[test]
    fn test_degenerate_bounds() {
        let backoff = Backoff::new(Duration::ZERO, Duration::ZERO, f64::NAN);
        assert_eq!(millis(backoff.floor()), 1);
        assert_eq!(millis(backoff.ceiling()), 1);
    }
}
