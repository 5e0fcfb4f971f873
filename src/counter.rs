use crate::config::COUNTER_DEFAULT_DURATION_MS;

/// Count-up value at `elapsed_ms` into a run of `duration_ms`.
pub fn counter_value(target: u32, duration_ms: f64, elapsed_ms: f64) -> u32 {
    if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
        return target;
    }

    let progress = (elapsed_ms.max(0.0) / duration_ms).min(1.0);
    let value = (progress * f64::from(target)).floor() as u32;
    value.min(target)
}

/// One count-up run per mount. `start` is honoured once; later calls,
/// including those after the value reached `target`, are ignored.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CounterRun {
    target: u32,
    duration_ms: f64,
    started_at: Option<f64>,
    current: u32,
}

impl CounterRun {
    pub fn new(target: u32) -> Self {
        Self::with_duration(target, COUNTER_DEFAULT_DURATION_MS)
    }

    pub fn with_duration(target: u32, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
            current: 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.started_at.is_some() && self.current == self.target
    }

    /// Returns `true` when this call started the run.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_ms);
        self.tick(now_ms);
        true
    }

    /// Advances to `now_ms` and returns whether another frame is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };

        let next = counter_value(self.target, self.duration_ms, now_ms - started_at);
        self.current = self.current.max(next);
        self.current < self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn value_starts_at_zero_and_snaps_to_target() {
        assert_eq!(counter_value(500, 2_000.0, 0.0), 0);
        assert_eq!(counter_value(500, 2_000.0, 1_000.0), 250);
        assert_eq!(counter_value(500, 2_000.0, 2_000.0), 500);
        assert_eq!(counter_value(500, 2_000.0, 9_999.0), 500);
    }

    #[test]
    fn value_floors_partial_progress() {
        assert_eq!(counter_value(3, 2_000.0, 1_000.0), 1);
        assert_eq!(counter_value(10, 3.0, 1.0), 3);
    }

    #[test]
    fn zero_duration_snaps_immediately() {
        assert_eq!(counter_value(42, 0.0, 0.0), 42);
        let mut run = CounterRun::with_duration(42, 0.0);
        run.start(10.0);
        assert!(run.is_finished());
    }

    #[test]
    fn ticking_before_start_does_nothing() {
        let mut run = CounterRun::new(100);
        assert!(!run.tick(5_000.0));
        assert_eq!(run.current(), 0);
    }

    #[test]
    fn run_never_restarts_after_reaching_target() {
        let mut run = CounterRun::new(1_200);
        assert!(run.start(100.0));
        assert!(!run.tick(2_100.0));
        assert_eq!(run.current(), 1_200);

        // Element scrolled away and back into view.
        assert!(!run.start(9_000.0));
        run.tick(9_001.0);
        assert_eq!(run.current(), 1_200);
    }

    #[test]
    fn restart_mid_run_keeps_original_clock() {
        let mut run = CounterRun::new(100);
        run.start(0.0);
        run.tick(1_000.0);
        assert_eq!(run.current(), 50);

        assert!(!run.start(1_000.0));
        run.tick(1_500.0);
        assert_eq!(run.current(), 75);
    }

    proptest! {
        #[test]
        fn value_is_monotonic_and_bounded(
            target in 0u32..1_000_000,
            duration in 1.0f64..10_000.0,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let (t1, t2) = if a <= b { (a * duration, b * duration) } else { (b * duration, a * duration) };
            let v1 = counter_value(target, duration, t1);
            let v2 = counter_value(target, duration, t2);

            prop_assert!(v1 <= v2);
            prop_assert!(v2 <= target);
            prop_assert_eq!(counter_value(target, duration, 0.0), 0);
            prop_assert_eq!(counter_value(target, duration, duration), target);
        }

        #[test]
        fn run_current_never_decreases(
            target in 0u32..100_000,
            samples in proptest::collection::vec(0.0f64..4_000.0, 1..40),
        ) {
            let mut samples = samples;
            samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let mut run = CounterRun::new(target);
            run.start(0.0);
            let mut previous = run.current();

            for sample in samples {
                run.tick(sample);
                prop_assert!(run.current() >= previous);
                prop_assert!(run.current() <= target);
                previous = run.current();
            }
        }
    }
}
