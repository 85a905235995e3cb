//! One tracked page view.
//!
//! A [`ScrollSession`] ties a metrics provider to a [`MilestoneTracker`]. The
//! host drains its [`ScrollEventSource`] into the session once per frame and
//! lets the session advance the debounce timer. Teardown consumes the
//! session, so nothing can fire after a page is unloaded.

use crate::backend::{EventSink, ScrollEventSource, ViewportMetrics};
use crate::config::TrackerConfig;
use crate::depth;
use crate::error::{Result, ScrollmarkError};
use crate::signal::ScrollSignal;
use crate::tracker::MilestoneTracker;

/// What a session achieved, reported at teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Fired milestones, ascending.
    pub fired: Vec<u8>,
    pub deepest_reached: i32,
    /// Milestone whose countdown was cancelled by the teardown.
    pub abandoned: Option<u8>,
    pub samples_taken: u64,
    pub samples_skipped: u64,
}

/// Scroll tracking for a single page view.
pub struct ScrollSession<M: ViewportMetrics> {
    metrics: M,
    tracker: MilestoneTracker,
    samples_taken: u64,
    samples_skipped: u64,
}

impl<M: ViewportMetrics> ScrollSession<M> {
    pub fn new(metrics: M, tracker: MilestoneTracker) -> Self {
        Self {
            metrics,
            tracker,
            samples_taken: 0,
            samples_skipped: 0,
        }
    }

    /// Validate `config` and start a session. Fails on invalid milestones.
    pub fn from_config(metrics: M, config: &TrackerConfig) -> Result<Self> {
        Ok(Self::new(metrics, MilestoneTracker::new(config)?))
    }

    /// Measure the page and feed the depth to the tracker.
    ///
    /// A failed measurement leaves the tracker untouched and is reported as
    /// `MetricsUnavailable`; the next signal simply retries.
    pub fn check_now(&mut self) -> Result<i32> {
        match depth::measure(&self.metrics) {
            Ok(depth) => {
                self.samples_taken += 1;
                self.tracker.on_sample(depth);
                Ok(depth)
            }
            Err(e) => {
                self.samples_skipped += 1;
                Err(if e.is_transient() {
                    e
                } else {
                    ScrollmarkError::MetricsUnavailable(e.to_string())
                })
            }
        }
    }

    /// Handle one signal from the host.
    pub fn on_signal(&mut self, signal: ScrollSignal) -> Result<i32> {
        let depth = self.check_now()?;
        log::trace!("{signal}: depth {depth}%");
        Ok(depth)
    }

    /// Advance the debounce timer without sampling.
    pub fn tick<S: EventSink + ?Sized>(&mut self, dt_ms: u32, sink: &mut S) -> usize {
        self.tracker.tick(dt_ms, sink)
    }

    /// Deliver every pending signal from `source`, then advance the timer by
    /// `dt_ms`. Unavailable measurements are dropped here.
    ///
    /// Returns the number of events emitted.
    pub fn pump<Src, S>(&mut self, source: &mut Src, dt_ms: u32, sink: &mut S) -> usize
    where
        Src: ScrollEventSource + ?Sized,
        S: EventSink + ?Sized,
    {
        for signal in source.poll_signals() {
            if let Err(e) = self.on_signal(signal) {
                log::debug!("Skipping {signal} sample: {e}");
            }
        }
        self.tick(dt_ms, sink)
    }

    /// Cancel any pending confirmation and detach `source`.
    pub fn teardown<Src: ScrollEventSource + ?Sized>(mut self, source: &mut Src) -> SessionSummary {
        source.detach();
        let abandoned = self.tracker.cancel_pending();
        if let Some(m) = abandoned {
            log::debug!("Teardown cancelled pending milestone {m}%");
        }
        let summary = SessionSummary {
            fired: self.tracker.fired(),
            deepest_reached: self.tracker.deepest_reached(),
            abandoned,
            samples_taken: self.samples_taken,
            samples_skipped: self.samples_skipped,
        };
        log::info!(
            "Scroll session closed: fired {:?}, {} samples ({} skipped)",
            summary.fired,
            summary.samples_taken,
            summary.samples_skipped
        );
        summary
    }

    pub fn tracker(&self) -> &MilestoneTracker {
        &self.tracker
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Mutable access for hosts that drive the page themselves.
    pub fn metrics_mut(&mut self) -> &mut M {
        &mut self.metrics
    }

    pub fn samples_taken(&self) -> u64 {
        self.samples_taken
    }

    pub fn samples_skipped(&self) -> u64 {
        self.samples_skipped
    }
}
