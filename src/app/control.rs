use std::time::{Duration, Instant};

use crate::app::collisions::Crash;

/// Fixed-interval trigger checked against the wall clock once per frame,
/// decoupling the simulation rate from the frame rate
pub struct Timer {
    interval: Duration,
    last: Instant,
}

impl Timer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True at most once per call; a late frame doesn't queue up
    /// extra firings
    pub fn fire(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// State of a round
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    Playing,
    Won,
    Lost(Crash),
}

impl State {
    pub fn is_over(self) -> bool {
        self != State::Playing
    }
}

#[test]
fn test_timer() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut timer = Timer::new(ms(100), t0);

    assert!(!timer.fire(t0 + ms(99)));
    assert!(timer.fire(t0 + ms(100)));
    assert!(!timer.fire(t0 + ms(150)));
    // 300ms late, still a single firing
    assert!(timer.fire(t0 + ms(500)));
    assert!(!timer.fire(t0 + ms(599)));
    assert!(timer.fire(t0 + ms(600)));
}
