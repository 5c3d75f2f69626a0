use std::thread;
use std::time::{Duration, Instant};

pub use thirtyfour::query::ElementPoller;

/// Drives one explicit wait: decides whether another poll is due and sleeps
/// until it is.
#[derive(Debug)]
pub struct ElementPollerTicker {
    timeout: Option<Duration>,
    interval: Option<Duration>,
    min_tries: u32,
    tries: u32,
    start: Instant,
}

impl ElementPollerTicker {
    pub fn new(poller: ElementPoller) -> Self {
        let (timeout, interval, min_tries) = match poller {
            ElementPoller::NoWait => (None, None, 0),
            ElementPoller::TimeoutWithInterval(t, i) => (Some(t), Some(i), 0),
            ElementPoller::NumTriesWithInterval(n, i) => (None, Some(i), n),
            ElementPoller::TimeoutWithIntervalAndMinTries(t, i, n) => (Some(t), Some(i), n),
        };
        Self {
            timeout,
            interval,
            min_tries,
            tries: 0,
            start: Instant::now(),
        }
    }

    /// Time since the first poll started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns false once the wait is exhausted. Otherwise blocks until the
    /// next poll is due and returns true.
    ///
    /// Polls are scheduled at whole multiples of the interval from the start,
    /// so a slow condition does not push later polls back.
    pub fn tick(&mut self) -> bool {
        self.tries += 1;

        let expired = self.timeout.map_or(true, |t| self.start.elapsed() >= t);
        if expired && self.tries >= self.min_tries {
            return false;
        }

        if let Some(interval) = self.interval {
            let due = interval * self.tries;
            if let Some(wait) = due.checked_sub(self.start.elapsed()) {
                thread::sleep(wait);
            }
        }
        true
    }
}
