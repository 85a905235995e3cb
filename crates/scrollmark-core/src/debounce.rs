//! The single debounce timer owned by a tracker.
//!
//! Time only moves when the host calls [`DebounceTimer::advance`], the same
//! way animations advance on frame ticks. This keeps the tracker
//! deterministic and free of any clock or scheduler dependency.

/// A pending confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    milestone: u8,
    remaining_ms: u32,
}

/// At most one outstanding countdown towards confirming a milestone.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    /// Full countdown length in milliseconds.
    pub interval_ms: u32,
    pending: Option<Pending>,
}

impl DebounceTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            pending: None,
        }
    }

    /// Start a fresh countdown for `milestone`.
    ///
    /// Any countdown already running is cancelled; its milestone is returned.
    pub fn arm(&mut self, milestone: u8) -> Option<u8> {
        let previous = self.cancel();
        self.pending = Some(Pending {
            milestone,
            remaining_ms: self.interval_ms,
        });
        previous
    }

    /// Drop the running countdown, if any.
    pub fn cancel(&mut self) -> Option<u8> {
        self.pending.take().map(|p| p.milestone)
    }

    /// Advance by `dt_ms`. Returns the milestone whose countdown ran out; the
    /// timer is disarmed when that happens.
    pub fn advance(&mut self, dt_ms: u32) -> Option<u8> {
        let pending = self.pending.as_mut()?;
        pending.remaining_ms = pending.remaining_ms.saturating_sub(dt_ms);
        if pending.remaining_ms == 0 {
            self.cancel()
        } else {
            None
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Milestone being counted down.
    pub fn milestone(&self) -> Option<u8> {
        self.pending.map(|p| p.milestone)
    }

    /// Time left before the countdown runs out.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.pending.map(|p| p.remaining_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_never_fires() {
        let mut t = DebounceTimer::new(100);
        assert!(!t.is_armed());
        assert_eq!(t.advance(1000), None);
    }

    #[test]
    fn fires_once_interval_elapses() {
        let mut t = DebounceTimer::new(100);
        assert_eq!(t.arm(50), None);
        assert_eq!(t.advance(60), None);
        assert_eq!(t.remaining_ms(), Some(40));
        assert_eq!(t.advance(40), Some(50));
        assert!(!t.is_armed());
        assert_eq!(t.advance(100), None);
    }

    #[test]
    fn overshooting_tick_still_fires() {
        let mut t = DebounceTimer::new(100);
        t.arm(25);
        assert_eq!(t.advance(250), Some(25));
    }

    #[test]
    fn rearm_cancels_and_restarts() {
        let mut t = DebounceTimer::new(100);
        t.arm(50);
        t.advance(90);
        assert_eq!(t.arm(75), Some(50));
        assert_eq!(t.milestone(), Some(75));
        assert_eq!(t.remaining_ms(), Some(100));
        assert_eq!(t.advance(90), None);
        assert_eq!(t.advance(10), Some(75));
    }

    #[test]
    fn cancel_disarms() {
        let mut t = DebounceTimer::new(100);
        t.arm(50);
        assert_eq!(t.cancel(), Some(50));
        assert_eq!(t.cancel(), None);
        assert_eq!(t.advance(100), None);
    }

    #[test]
    fn zero_interval_fires_on_next_advance() {
        let mut t = DebounceTimer::new(0);
        t.arm(100);
        assert_eq!(t.advance(0), Some(100));
    }
}
