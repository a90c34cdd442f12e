/// Fixed-interval gate between tick-rate sampling and the durable log.
///
/// The decimator is rate-based, not count-based: if the host tick rate
/// drops below `1 / interval` it simply records fewer samples, with no
/// backfill or interpolation. Only logging cadence is affected; audio
/// feedback runs every tick regardless.
#[derive(Debug, Clone)]
pub struct Decimator {
    interval: f32,
    last_log_time: f32,
}

impl Decimator {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_log_time: 0.0,
        }
    }

    /// Returns the configured logging interval in seconds.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Returns true when a full interval has elapsed since the last
    /// emission, advancing the window when it has.
    pub fn should_emit(&mut self, now: f32) -> bool {
        if now - self.last_log_time >= self.interval {
            self.last_log_time = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_at_most_once_per_interval() {
        let mut decimator = Decimator::new(0.1);
        // 100 ticks at 1 kHz span 0.1 s; only one may pass the gate.
        let emitted = (1..=100)
            .filter(|tick| decimator.should_emit(*tick as f32 * 0.001))
            .count();
        assert_eq!(emitted, 1);
    }

    #[test]
    fn emission_count_tracks_duration_over_interval() {
        // 64 Hz ticks over 10 seconds against a 0.125 s window; both
        // values are exactly representable, so the count is exact.
        let mut decimator = Decimator::new(0.125);
        let emitted = (1..=640)
            .filter(|tick| decimator.should_emit(*tick as f32 * 0.015625))
            .count();
        assert_eq!(emitted, 80);
    }

    #[test]
    fn slow_tick_rate_records_fewer_samples() {
        let mut decimator = Decimator::new(0.1);
        // 4 Hz ticks are slower than the nominal 10 Hz logging rate;
        // every tick passes, nothing is backfilled.
        let emitted = (1..=8)
            .filter(|tick| decimator.should_emit(*tick as f32 * 0.25))
            .count();
        assert_eq!(emitted, 8);
    }
}
