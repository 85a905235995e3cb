//! Frame-stepped trace replay.

use scrollmark_core::backend::EventSink;
use scrollmark_core::config::TrackerConfig;
use scrollmark_core::error::Result;
use scrollmark_core::{ScrollSession, SessionSummary};

use crate::trace::{Trace, TraceSource};

/// Simulated frame length. Signals that land in the same frame are
/// measured together, as a browser coalesces scroll events per frame.
pub const FRAME_MS: u32 = 16;

/// Outcome of a replay.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub summary: SessionSummary,
    pub emitted: usize,
    pub elapsed_ms: u64,
}

/// Replay `trace` against a fresh tracker built from `config`.
///
/// Idle stretches (no pending countdown) jump straight to the next event.
/// After the last event the clock keeps running only while a milestone is
/// still counting down, so the replay ends once everything has settled.
pub fn replay<S: EventSink + ?Sized>(
    trace: &Trace,
    config: &TrackerConfig,
    sink: &mut S,
) -> Result<ReplayReport> {
    let mut session = ScrollSession::from_config(trace.initial_page(), config)?;
    let mut source = TraceSource::new(trace.events.clone());

    let mut now_ms = 0u64;
    let mut emitted = 0;

    loop {
        source.advance(now_ms, session.metrics_mut());
        emitted += session.pump(&mut source, FRAME_MS, sink);

        let idle = session.tracker().pending_milestone().is_none();
        match source.next_at_ms() {
            None if idle => break,
            Some(next) if idle && next > now_ms => now_ms = next,
            _ => now_ms = now_ms.saturating_add(u64::from(FRAME_MS)),
        }
    }

    log::debug!(
        "Replay finished at {now_ms}ms, page at {}px of {}px (bottom: {}, trace exhausted: {})",
        session.metrics().scroll_y,
        session.metrics().content_height,
        session.metrics().at_bottom(),
        source.is_exhausted(),
    );
    let summary = session.teardown(&mut source);
    debug_assert!(source.is_detached());
    Ok(ReplayReport {
        summary,
        emitted,
        elapsed_ms: now_ms,
    })
}
