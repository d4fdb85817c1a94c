//! The shared audio clock every scheduled event is timed against.

mod timer;

use std::sync::Mutex;

use timer::Timer;

/// Monotonically increasing time source, in floating-point seconds.
///
/// One instance is shared by the clock bridge and the note scheduler.
/// The reading advances only while the clock is running; suspended
/// intervals are excluded. Only the clock bridge toggles the run state.
pub struct AudioClock {
    timer: Mutex<Timer>,
}

impl AudioClock {
    /// Create a suspended clock reading 0.0.
    pub fn new() -> Self {
        Self {
            timer: Mutex::new(Timer::new()),
        }
    }

    /// Start the clock advancing. No-op if already running.
    pub fn resume(&self) {
        self.timer.lock().unwrap().resume();
    }

    /// Freeze the clock reading. No-op if already suspended.
    pub fn suspend(&self) {
        self.timer.lock().unwrap().pause();
    }

    pub fn is_running(&self) -> bool {
        self.timer.lock().unwrap().is_running()
    }

    /// Seconds elapsed while running since the clock was created.
    pub fn current_time(&self) -> f64 {
        self.timer.lock().unwrap().elapsed().as_secs_f64()
    }
}

impl Default for AudioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn new_clock_is_suspended_at_zero() {
        let clock = AudioClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn reading_increases_while_running() {
        let clock = AudioClock::new();
        clock.resume();

        let mut previous = clock.current_time();
        for _ in 0..5 {
            sleep(Duration::from_millis(5));
            let reading = clock.current_time();
            assert!(reading > previous);
            previous = reading;
        }
    }

    #[test]
    fn suspend_freezes_the_reading() {
        let clock = AudioClock::new();
        clock.resume();
        sleep(Duration::from_millis(20));
        clock.suspend();

        let frozen = clock.current_time();
        sleep(Duration::from_millis(20));
        assert_eq!(clock.current_time(), frozen);

        clock.resume();
        sleep(Duration::from_millis(10));
        assert!(clock.current_time() > frozen);
    }

    #[test]
    fn suspend_while_suspended_keeps_state() {
        let clock = AudioClock::new();
        clock.suspend();
        assert!(!clock.is_running());
        assert_eq!(clock.current_time(), 0.0);
    }
}
