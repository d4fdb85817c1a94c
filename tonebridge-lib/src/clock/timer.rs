use std::time::{Duration, Instant};

/// Pausable stopwatch backing [`AudioClock`](super::AudioClock).
///
/// Accumulates wall-clock time only while running; paused intervals are
/// excluded from the reading.
#[derive(Debug, Clone)]
pub(super) struct Timer {
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            resumed_at: None,
        }
    }

    pub(super) fn resume(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(resumed_at) = self.resumed_at.take() {
            self.accumulated += resumed_at.elapsed();
        }
    }

    pub(super) fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    pub(super) fn elapsed(&self) -> Duration {
        match self.resumed_at {
            Some(resumed_at) => self.accumulated + resumed_at.elapsed(),
            None => self.accumulated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn starts_paused_at_zero() {
        let timer = Timer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn accumulates_only_while_running() {
        let mut timer = Timer::new();
        timer.resume();
        sleep(Duration::from_millis(30));
        timer.pause();

        let paused_reading = timer.elapsed();
        assert!(paused_reading >= Duration::from_millis(30));

        sleep(Duration::from_millis(30));
        assert_eq!(timer.elapsed(), paused_reading);

        timer.resume();
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed() > paused_reading);
    }

    #[test]
    fn resume_while_running_keeps_the_origin() {
        let mut timer = Timer::new();
        timer.resume();
        sleep(Duration::from_millis(10));
        timer.resume();
        assert!(timer.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn pause_while_paused_is_a_no_op() {
        let mut timer = Timer::new();
        timer.resume();
        sleep(Duration::from_millis(10));
        timer.pause();
        let reading = timer.elapsed();
        timer.pause();
        assert_eq!(timer.elapsed(), reading);
    }
}
