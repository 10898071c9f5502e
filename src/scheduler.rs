use log::debug;
use std::time::{Duration, Instant};

/// Ticks replayed in one go before the backlog is dropped
pub const MAX_CATCH_UP: u32 = 5;

/// Fixed-rate tick clock with a separately capped frame clock
#[derive(Clone, Copy, Debug)]
pub struct Scheduler {
    next_tick: Instant,
    next_frame: Instant,
    tick_interval: Duration,
    frame_interval: Duration,
}

impl Scheduler {
    /// First tick and first frame are both due at `start`
    pub fn new(start: Instant, tick_interval: Duration, frame_interval: Duration) -> Self {
        Scheduler {
            next_tick: start,
            next_frame: start,
            tick_interval: tick_interval.max(Duration::from_micros(1)),
            frame_interval: frame_interval.max(Duration::from_millis(1)),
        }
    }

    /// Earliest instant at which something becomes due
    pub fn next_deadline(&self) -> Instant {
        self.next_tick.min(self.next_frame)
    }

    /// Number of ticks to run at `now`.
    ///
    /// At most `MAX_CATCH_UP`; anything beyond that is dropped and the next
    /// tick is pushed to one interval after `now`.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while self.next_tick <= now {
            self.next_tick += self.tick_interval;
            ticks += 1;
            if ticks >= MAX_CATCH_UP && self.next_tick <= now {
                debug!("dropping tick backlog of {:?}", now - self.next_tick);
                self.next_tick = now + self.tick_interval;
            }
        }
        ticks
    }

    /// Whether a frame should be drawn at `now`; if so the next one is
    /// scheduled a full frame interval later
    pub fn frame_due(&mut self, now: Instant) -> bool {
        if self.next_frame > now {
            return false;
        }
        self.next_frame = now + self.frame_interval;
        true
    }

    /// Makes the next frame due at `now`
    pub fn redraw_at(&mut self, now: Instant) {
        self.next_frame = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    #[test]
    fn one_tick_per_interval() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start, TICK, TICK);
        assert_eq!(scheduler.due_ticks(start), 1);
        assert_eq!(scheduler.due_ticks(start + TICK / 2), 0);
        for i in 1..=10 {
            assert_eq!(scheduler.due_ticks(start + TICK * i), 1);
        }
        assert_eq!(scheduler.due_ticks(start + TICK * 11 - Duration::from_millis(1)), 0);
    }

    #[test]
    fn short_lag_is_replayed() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start, TICK, TICK);
        scheduler.due_ticks(start);
        assert_eq!(scheduler.due_ticks(start + TICK * 3), 3);
        assert_eq!(scheduler.due_ticks(start + TICK * 4), 1);
    }

    #[test]
    fn catch_up_is_capped() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start, TICK, TICK);
        scheduler.due_ticks(start);
        let now = start + Duration::from_secs(1);
        assert_eq!(scheduler.due_ticks(now), MAX_CATCH_UP);
    }

    #[test]
    fn backlog_resets_after_stall() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start, TICK, Duration::from_secs(10));
        scheduler.due_ticks(start);
        scheduler.frame_due(start);

        let now = start + Duration::from_secs(1);
        scheduler.due_ticks(now);
        assert_eq!(scheduler.next_deadline(), now + TICK);
        assert_eq!(scheduler.due_ticks(now + TICK - Duration::from_millis(1)), 0);
        assert_eq!(scheduler.due_ticks(now + TICK), 1);
    }

    #[test]
    fn frames_are_capped() {
        let start = Instant::now();
        let frame = Duration::from_millis(33);
        let mut scheduler = Scheduler::new(start, TICK, frame);
        assert!(scheduler.frame_due(start));
        assert!(!scheduler.frame_due(start));
        assert!(!scheduler.frame_due(start + Duration::from_millis(32)));
        assert!(scheduler.frame_due(start + frame));
        // Late frames schedule from when they were drawn
        let late = start + Duration::from_millis(100);
        assert!(scheduler.frame_due(late));
        assert!(!scheduler.frame_due(late + Duration::from_millis(32)));
        assert!(scheduler.frame_due(late + frame));
    }

    #[test]
    fn redraw_makes_frame_due_immediately() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new(start, TICK, Duration::from_secs(1));
        assert!(scheduler.frame_due(start));
        let resized = start + Duration::from_millis(5);
        scheduler.redraw_at(resized);
        assert!(scheduler.frame_due(resized));
    }
}
