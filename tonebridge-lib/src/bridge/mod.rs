//! Clock bridge: forwards the shared clock reading outward once per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::clock::AudioClock;
use crate::message::Event;

/// Default sampling cadence, matching a typical display refresh.
pub const DEFAULT_FRAME_RATE: f32 = 60.0;

/// Handle to the one active sampler, if any.
struct ClockSubscription {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Reports the shared clock to the UI layer at frame cadence.
///
/// The sampler is a restartable repeating sequence: each pass reads the
/// clock, sends a [`Event::ClockUpdate`], and sleeps one frame interval
/// until cancelled. Samples within one running interval strictly
/// increase; nothing is guaranteed about their jitter.
pub struct ClockBridge {
    clock: Arc<AudioClock>,
    events: Sender<Event>,
    frame_interval: Duration,
    subscription: Option<ClockSubscription>,
}

impl ClockBridge {
    pub fn new(clock: Arc<AudioClock>, events: Sender<Event>, frame_rate: f32) -> Self {
        // Non-finite rates would collapse the frame interval to zero and
        // turn the sampler into a busy loop.
        let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            DEFAULT_FRAME_RATE
        };

        Self {
            clock,
            events,
            frame_interval: Duration::from_secs_f32(1.0 / frame_rate),
            subscription: None,
        }
    }

    /// Resume the clock and begin per-frame sampling.
    ///
    /// Idempotent: a second start while running changes nothing, exactly
    /// one sampler exists at a time.
    pub fn start(&mut self) {
        self.clock.resume();
        if self.subscription.is_some() {
            return;
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let clock = Arc::clone(&self.clock);
        let events = self.events.clone();
        let interval = self.frame_interval;

        let handle = std::thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                let current_time = clock.current_time();
                if events.send(Event::ClockUpdate { current_time }).is_err() {
                    // Receiver went away; nothing left to report to.
                    break;
                }
                std::thread::sleep(interval);
            }
        });

        self.subscription = Some(ClockSubscription { cancel, handle });
    }

    /// Cancel sampling and suspend the clock.
    ///
    /// Idempotent: stopping while stopped leaves the clock untouched.
    pub fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel.store(true, Ordering::Relaxed);
            if subscription.handle.join().is_err() {
                log::warn!("clock sampler panicked during join");
            }
            self.clock.suspend();
        }
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Drop for ClockBridge {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, Receiver};
    use std::thread::sleep;

    fn drain_samples(receiver: &Receiver<Event>) -> Vec<f64> {
        receiver
            .try_iter()
            .map(|event| match event {
                Event::ClockUpdate { current_time } => current_time,
            })
            .collect()
    }

    #[test]
    fn emits_strictly_increasing_samples() {
        let clock = Arc::new(AudioClock::new());
        let (tx, rx) = mpsc::channel();
        let mut bridge = ClockBridge::new(Arc::clone(&clock), tx, 100.0);

        bridge.start();
        sleep(Duration::from_millis(100));
        bridge.stop();

        let samples = drain_samples(&rx);
        assert!(samples.len() >= 2, "expected several samples, got {}", samples.len());
        for pair in samples.windows(2) {
            assert!(pair[0] < pair[1], "samples must strictly increase");
        }
        assert!(!clock.is_running());
    }

    #[test]
    fn double_start_keeps_a_single_sampler() {
        let clock = Arc::new(AudioClock::new());
        let (tx, rx) = mpsc::channel();
        let mut bridge = ClockBridge::new(clock, tx, 50.0);

        bridge.start();
        bridge.start();
        assert!(bridge.is_running());

        sleep(Duration::from_millis(200));
        bridge.stop();

        // One sampler at 50 fps yields roughly 10 samples in 200 ms; two
        // interleaved samplers would roughly double that.
        let samples = drain_samples(&rx);
        assert!(samples.len() >= 2);
        assert!(
            samples.len() <= 15,
            "sample count {} suggests more than one sampler",
            samples.len()
        );
    }

    #[test]
    fn stop_without_start_leaves_clock_untouched() {
        let clock = Arc::new(AudioClock::new());
        let (tx, _rx) = mpsc::channel();
        let mut bridge = ClockBridge::new(Arc::clone(&clock), tx, 60.0);

        bridge.stop();
        assert!(!bridge.is_running());
        assert!(!clock.is_running());
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn unusable_frame_rates_fall_back_to_default() {
        let default_interval = Duration::from_secs_f32(1.0 / DEFAULT_FRAME_RATE);
        for frame_rate in [f32::INFINITY, f32::NAN, 0.0, -30.0] {
            let clock = Arc::new(AudioClock::new());
            let (tx, _rx) = mpsc::channel();
            let bridge = ClockBridge::new(clock, tx, frame_rate);
            assert_eq!(bridge.frame_interval, default_interval);
        }
    }

    #[test]
    fn restart_resumes_from_the_paused_reading() {
        let clock = Arc::new(AudioClock::new());
        let (tx, rx) = mpsc::channel();
        let mut bridge = ClockBridge::new(Arc::clone(&clock), tx, 100.0);

        bridge.start();
        sleep(Duration::from_millis(50));
        bridge.stop();

        let frozen = clock.current_time();
        let _ = drain_samples(&rx);

        bridge.start();
        sleep(Duration::from_millis(50));
        bridge.stop();

        let samples = drain_samples(&rx);
        assert!(!samples.is_empty());
        for sample in samples {
            assert!(sample >= frozen);
        }
        assert!(clock.current_time() > frozen);
    }
}
