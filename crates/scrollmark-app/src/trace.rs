//! Recorded scroll traces.
//!
//! A trace describes a page and a timeline of host notifications:
//!
//! ```toml
//! [page]
//! viewport_height = 800
//! document_height = 4000
//!
//! [[events]]
//! at_ms = 120
//! kind = "scroll"
//! scroll_y = 900
//!
//! [[events]]
//! at_ms = 4000
//! kind = "resize"
//! viewport_height = 600
//! ```

use std::collections::VecDeque;
use std::path::Path;

use serde::Deserialize;

use scrollmark_core::backend::ScrollEventSource;
use scrollmark_core::error::{Result, ScrollmarkError};
use scrollmark_core::signal::ScrollSignal;

use crate::page::PageViewport;

/// Initial page geometry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageSpec {
    pub viewport_height: i32,
    pub document_height: i32,
}

fn default_kind() -> ScrollSignal {
    ScrollSignal::Scroll
}

/// One host notification and the page change that caused it.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceEvent {
    pub at_ms: u64,
    #[serde(default = "default_kind")]
    pub kind: ScrollSignal,
    pub scroll_y: Option<i32>,
    pub viewport_height: Option<i32>,
    pub document_height: Option<i32>,
}

impl TraceEvent {
    /// Apply this event's geometry change to `page`.
    pub fn apply(&self, page: &mut PageViewport) {
        if let Some(h) = self.document_height {
            page.set_content_height(h);
        }
        if let Some(h) = self.viewport_height {
            page.set_viewport_height(h);
        }
        if let Some(y) = self.scroll_y {
            page.scroll_to(y);
        }
    }
}

/// A parsed trace file.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    pub page: PageSpec,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Parse a trace document. `origin` names it in error messages.
    pub fn parse(source: &str, origin: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ScrollmarkError::Config(format!("{origin}: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source, &path.display().to_string())
    }

    /// Timestamp of the last event.
    pub fn duration_ms(&self) -> u64 {
        self.events.iter().map(|e| e.at_ms).max().unwrap_or(0)
    }

    pub fn initial_page(&self) -> PageViewport {
        PageViewport::new(self.page.viewport_height, self.page.document_height)
    }
}

/// Plays trace events back as scroll signals.
pub struct TraceSource {
    events: VecDeque<TraceEvent>,
    queued: Vec<ScrollSignal>,
    detached: bool,
}

impl TraceSource {
    pub fn new(mut events: Vec<TraceEvent>) -> Self {
        events.sort_by_key(|e| e.at_ms);
        Self {
            events: events.into(),
            queued: Vec::new(),
            detached: false,
        }
    }

    /// Apply every event due at or before `now_ms` to `page` and queue its
    /// signal. Returns the number of events applied.
    pub fn advance(&mut self, now_ms: u64, page: &mut PageViewport) -> usize {
        if self.detached {
            return 0;
        }
        let mut applied = 0;
        while self.events.front().is_some_and(|e| e.at_ms <= now_ms) {
            let Some(event) = self.events.pop_front() else {
                break;
            };
            event.apply(page);
            self.queued.push(event.kind);
            applied += 1;
        }
        applied
    }

    /// Timestamp of the next event still to be applied.
    pub fn next_at_ms(&self) -> Option<u64> {
        self.events.front().map(|e| e.at_ms)
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl ScrollEventSource for TraceSource {
    fn poll_signals(&mut self) -> Vec<ScrollSignal> {
        std::mem::take(&mut self.queued)
    }

    fn detach(&mut self) {
        self.detached = true;
        self.queued.clear();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [page]
        viewport_height = 500
        document_height = 2000

        [[events]]
        at_ms = 300
        kind = "touchmove"
        scroll_y = 1500

        [[events]]
        at_ms = 100
        scroll_y = 500

        [[events]]
        at_ms = 900
        kind = "resize"
        viewport_height = 1000
    "#;

    #[test]
    fn parse_trace() {
        let trace = Trace::parse(SAMPLE, "sample").unwrap();
        assert_eq!(trace.page.viewport_height, 500);
        assert_eq!(trace.events.len(), 3);
        assert_eq!(trace.events[1].kind, ScrollSignal::Scroll);
        assert_eq!(trace.duration_ms(), 900);
    }

    #[test]
    fn events_without_timeline_are_allowed() {
        let trace = Trace::parse("[page]\nviewport_height = 1\ndocument_height = 1\n", "bare").unwrap();
        assert!(trace.events.is_empty());
        assert_eq!(trace.duration_ms(), 0);
    }

    #[test]
    fn missing_page_is_config_error() {
        let err = Trace::parse("[[events]]\nat_ms = 0\n", "headless").unwrap_err();
        assert!(matches!(err, ScrollmarkError::Config(_)));
        assert!(format!("{err}").contains("headless"));
    }

    #[test]
    fn source_applies_events_in_time_order() {
        let trace = Trace::parse(SAMPLE, "sample").unwrap();
        let mut page = trace.initial_page();
        let mut source = TraceSource::new(trace.events.clone());

        assert_eq!(source.next_at_ms(), Some(100));
        assert_eq!(source.advance(50, &mut page), 0);
        assert!(source.poll_signals().is_empty());

        assert_eq!(source.advance(300, &mut page), 2);
        assert_eq!(page.scroll_y, 1500);
        assert_eq!(
            source.poll_signals(),
            vec![ScrollSignal::Scroll, ScrollSignal::TouchMove]
        );
        assert!(source.poll_signals().is_empty());

        assert_eq!(source.advance(1000, &mut page), 1);
        assert_eq!(page.viewport_height, 1000);
        // Taller viewport lowers the maximum offset.
        assert_eq!(page.scroll_y, 1000);
        assert!(source.is_exhausted());
    }

    #[test]
    fn detached_source_goes_quiet() {
        let trace = Trace::parse(SAMPLE, "sample").unwrap();
        let mut page = trace.initial_page();
        let mut source = TraceSource::new(trace.events.clone());
        source.advance(100, &mut page);
        source.detach();
        assert!(source.is_detached());
        assert!(source.poll_signals().is_empty());
        assert_eq!(source.advance(10_000, &mut page), 0);
        assert_eq!(page.scroll_y, 500);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let trace = Trace::load(&path).unwrap();
        assert_eq!(trace.events.len(), 3);
    }
}
