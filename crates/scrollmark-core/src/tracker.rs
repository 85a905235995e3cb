//! The milestone state machine.
//!
//! A [`MilestoneTracker`] consumes integer depth samples and decides when a
//! milestone has been reached for long enough to report. There is no
//! enumerated state: the protocol lives in a handful of counters.
//!
//! - `deepest_reached` only ever grows. Scrolling back up never un-fires a
//!   milestone.
//! - One threshold transition per sample. A jump over several thresholds
//!   arms only the deepest; the skipped ones are backfilled on confirmation.
//! - A single debounce timer. Crossing a deeper threshold before the timer
//!   runs out cancels it and starts a new one.
//! - Every milestone is emitted at most once.

use crate::backend::EventSink;
use crate::config::{DwellPolicy, Milestones, TrackerConfig};
use crate::debounce::DebounceTimer;
use crate::error::Result;
use crate::event::MilestoneEvent;

/// Set of fired milestone values (0..=100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FiredSet(u128);

impl FiredSet {
    /// Insert `value`. Returns false if it was already present.
    fn insert(&mut self, value: u8) -> bool {
        let bit = 1u128 << value;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    fn contains(self, value: u8) -> bool {
        value < 128 && self.0 & (1u128 << value) != 0
    }

    fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    fn iter(self) -> impl Iterator<Item = u8> {
        (0..=100u8).filter(move |&v| self.contains(v))
    }
}

/// Debounced, monotonic scroll milestone tracker for one page view.
#[derive(Debug, Clone)]
pub struct MilestoneTracker {
    milestones: Milestones,
    dwell: DwellPolicy,
    fired: FiredSet,
    deepest_reached: i32,
    last_confirmed: i32,
    last_depth: Option<i32>,
    /// Milestone whose timer ran out while the user was above it
    /// (presence policy only).
    withheld: Option<u8>,
    timer: DebounceTimer,
}

impl MilestoneTracker {
    /// Build a tracker from raw config. Invalid milestone lists are rejected.
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let milestones = config.validate()?;
        Ok(Self::with_milestones(
            milestones,
            config.debounce_ms,
            config.dwell,
        ))
    }

    pub fn with_milestones(milestones: Milestones, debounce_ms: u32, dwell: DwellPolicy) -> Self {
        let lower = milestones.lower_bound();
        log::debug!(
            "Tracking milestones {:?} (debounce {debounce_ms}ms, {dwell:?})",
            milestones.values()
        );
        Self {
            milestones,
            dwell,
            fired: FiredSet::default(),
            deepest_reached: lower,
            last_confirmed: lower,
            last_depth: None,
            withheld: None,
            timer: DebounceTimer::new(debounce_ms),
        }
    }

    /// Feed one depth sample.
    ///
    /// Returns the milestone whose debounce timer was (re)armed by this
    /// sample, if any. Never emits; emission happens in [`tick`](Self::tick).
    pub fn on_sample(&mut self, depth: i32) -> Option<u8> {
        self.last_depth = Some(depth);

        let deepest = self.deepest_reached;
        let crossed = self
            .milestones
            .values()
            .iter()
            .rev()
            .copied()
            .find(|&m| depth >= i32::from(m) && i32::from(m) > deepest);

        let Some(m) = crossed else {
            return self.rearm_withheld(depth);
        };

        self.deepest_reached = i32::from(m);
        if i32::from(m) == self.last_confirmed {
            return None;
        }

        self.last_confirmed = i32::from(m);
        self.withheld = None;
        if let Some(superseded) = self.timer.arm(m) {
            log::debug!("Milestone {superseded}% superseded by {m}% before confirmation");
        }
        log::debug!("Milestone {m}% reached at depth {depth}, waiting {}ms", self.timer.interval_ms);
        Some(m)
    }

    /// Presence policy: restart the countdown for a withheld milestone once
    /// the user is back at or past it.
    fn rearm_withheld(&mut self, depth: i32) -> Option<u8> {
        let m = self.withheld?;
        if depth < i32::from(m) || self.timer.is_armed() {
            return None;
        }
        self.withheld = None;
        self.timer.arm(m);
        log::debug!("Milestone {m}% re-armed at depth {depth}");
        Some(m)
    }

    /// Advance the debounce timer by `dt_ms` and confirm the pending
    /// milestone if its interval has run out.
    ///
    /// Returns the number of events emitted.
    pub fn tick<S: EventSink + ?Sized>(&mut self, dt_ms: u32, sink: &mut S) -> usize {
        let Some(m) = self.timer.advance(dt_ms) else {
            return 0;
        };

        if self.dwell == DwellPolicy::Presence
            && self.last_depth.is_some_and(|d| d < i32::from(m))
        {
            log::debug!("Milestone {m}% withheld: user scrolled back above it");
            self.withheld = Some(m);
            return 0;
        }

        self.confirm(m, sink)
    }

    /// Emit `milestone`, preceded by every lower milestone that has not fired
    /// yet (ascending). Already-fired milestones are skipped.
    ///
    /// Returns the number of events emitted.
    pub fn confirm<S: EventSink + ?Sized>(&mut self, milestone: u8, sink: &mut S) -> usize {
        if !self.milestones.contains(milestone) {
            log::warn!("Ignoring confirmation of unconfigured milestone {milestone}%");
            return 0;
        }

        let mut emitted = 0;
        for &lower in self.milestones.values().iter().take_while(|&&v| v < milestone) {
            if self.fired.insert(lower) {
                log::info!("Milestone {lower}% confirmed (backfill)");
                sink.emit(&MilestoneEvent::new(lower));
                emitted += 1;
            }
        }
        if self.fired.insert(milestone) {
            log::info!("Milestone {milestone}% confirmed");
            sink.emit(&MilestoneEvent::new(milestone));
            emitted += 1;
        }
        emitted
    }

    /// Drop any outstanding timer or withheld milestone without confirming
    /// it. Returns the milestone that was waiting.
    pub fn cancel_pending(&mut self) -> Option<u8> {
        let withheld = self.withheld.take();
        self.timer.cancel().or(withheld)
    }

    pub fn milestones(&self) -> &Milestones {
        &self.milestones
    }

    pub fn lower_bound(&self) -> i32 {
        self.milestones.lower_bound()
    }

    pub fn dwell(&self) -> DwellPolicy {
        self.dwell
    }

    pub fn deepest_reached(&self) -> i32 {
        self.deepest_reached
    }

    pub fn last_confirmed(&self) -> i32 {
        self.last_confirmed
    }

    pub fn last_depth(&self) -> Option<i32> {
        self.last_depth
    }

    pub fn pending_milestone(&self) -> Option<u8> {
        self.timer.milestone()
    }

    pub fn pending_remaining_ms(&self) -> Option<u32> {
        self.timer.remaining_ms()
    }

    pub fn withheld_milestone(&self) -> Option<u8> {
        self.withheld
    }

    pub fn has_fired(&self, milestone: u8) -> bool {
        self.fired.contains(milestone)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    /// Fired milestones in ascending order.
    pub fn fired(&self) -> Vec<u8> {
        self.fired.iter().collect()
    }
}
