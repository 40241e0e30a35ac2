//! Poll scheduling with in-flight tracking and stale-response rejection.
//!
//! The reply poll runs on a fixed cadence, but a tick never starts while a
//! previous poll is still outstanding, and every poll carries a sequence
//! number: a completion that is not newer than the last delivered one is
//! discarded. Replies therefore render in the order the backend produced
//! them even if the transport misbehaves.

use std::time::{Duration, Instant};

/// Fixed cadence of the reply poll.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct PollScheduler {
    interval: Duration,
    /// None until `start` is called; polling is disabled.
    next_due: Option<Instant>,
    in_flight: Option<u64>,
    next_seq: u64,
    last_delivered: u64,
}

impl PollScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            in_flight: None,
            next_seq: 0,
            last_delivered: 0,
        }
    }

    /// Enable polling; the first poll is due immediately.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    /// Disable polling. An outstanding poll may still complete and will be
    /// delivered or discarded by its sequence number as usual.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Begin a poll if one is due and none is outstanding. Returns the
    /// sequence number to tag the request with.
    pub fn begin_due(&mut self, now: Instant) -> Option<u64> {
        let due = self.next_due?;
        if now < due || self.in_flight.is_some() {
            return None;
        }
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        self.next_due = Some(now + self.interval);
        Some(self.next_seq)
    }

    /// Record a completed poll. Returns true when the completion is fresh
    /// and its result should be delivered, false when it is stale.
    pub fn complete(&mut self, seq: u64) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
        }
        if seq <= self.last_delivered {
            return false;
        }
        self.last_delivered = seq;
        true
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_until_started() {
        let mut sched = PollScheduler::new(Duration::from_secs(1));
        assert!(sched.begin_due(Instant::now()).is_none());

        let now = Instant::now();
        sched.start(now);
        assert_eq!(sched.begin_due(now), Some(1));
    }

    #[test]
    fn test_no_overlapping_polls() {
        let mut sched = PollScheduler::new(Duration::from_secs(1));
        let now = Instant::now();
        sched.start(now);

        let seq = sched.begin_due(now).unwrap();
        // next tick is due but the first poll is still in flight
        let later = now + Duration::from_secs(5);
        assert!(sched.begin_due(later).is_none());

        assert!(sched.complete(seq));
        assert_eq!(sched.begin_due(later), Some(2));
    }

    #[test]
    fn test_respects_cadence() {
        let mut sched = PollScheduler::new(Duration::from_secs(1));
        let now = Instant::now();
        sched.start(now);

        let seq = sched.begin_due(now).unwrap();
        assert!(sched.complete(seq));
        // not due again until the interval has elapsed
        assert!(sched.begin_due(now + Duration::from_millis(500)).is_none());
        assert!(sched.begin_due(now + Duration::from_secs(1)).is_some());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut sched = PollScheduler::new(Duration::from_secs(1));
        let now = Instant::now();
        sched.start(now);

        let first = sched.begin_due(now).unwrap();
        assert!(sched.complete(first));
        let second = sched.begin_due(now + Duration::from_secs(1)).unwrap();
        assert!(sched.complete(second));

        // a duplicate or out-of-order completion for an older poll
        assert!(!sched.complete(first));
    }

    #[test]
    fn test_stop_disables_future_polls() {
        let mut sched = PollScheduler::new(Duration::from_secs(1));
        let now = Instant::now();
        sched.start(now);
        let seq = sched.begin_due(now).unwrap();
        sched.stop();
        sched.complete(seq);
        assert!(sched.begin_due(now + Duration::from_secs(10)).is_none());
    }
}
