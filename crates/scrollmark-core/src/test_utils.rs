//! Shared test doubles for the tracker and session.
//!
//! Provides a [`ScriptedMetrics`] provider whose geometry the test moves
//! between samples, and a [`QueueSource`] that hands out queued signals.

use std::cell::Cell;
use std::collections::VecDeque;

use crate::backend::{ScrollEventSource, ViewportGeometry, ViewportMetrics};
use crate::error::{Result, ScrollmarkError};
use crate::signal::ScrollSignal;

/// Page geometry the test can move between samples.
pub struct ScriptedMetrics {
    viewport_height: f64,
    document_height: f64,
    scroll_offset: Cell<f64>,
    detached: Cell<bool>,
    queries: Cell<usize>,
}

impl ScriptedMetrics {
    /// A 1000px document in a 100px viewport: depth = 10 + offset / 10.
    pub fn new() -> Self {
        Self::with_page(100.0, 1000.0)
    }

    pub fn with_page(viewport_height: f64, document_height: f64) -> Self {
        Self {
            viewport_height,
            document_height,
            scroll_offset: Cell::new(0.0),
            detached: Cell::new(false),
            queries: Cell::new(0),
        }
    }

    pub fn scroll_to(&self, offset: f64) {
        self.scroll_offset.set(offset);
    }

    /// Place the viewport so the page reads `depth` percent.
    pub fn scroll_to_depth(&self, depth: f64) {
        let offset = self.document_height * depth / 100.0 - self.viewport_height;
        self.scroll_offset.set(offset);
    }

    /// Make every subsequent measurement fail.
    pub fn detach(&self) {
        self.detached.set(true);
    }

    pub fn reattach(&self) {
        self.detached.set(false);
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl ViewportMetrics for ScriptedMetrics {
    fn measure(&self) -> Result<ViewportGeometry> {
        self.queries.set(self.queries.get() + 1);
        if self.detached.get() {
            return Err(ScrollmarkError::MetricsUnavailable(
                "document detached".into(),
            ));
        }
        Ok(ViewportGeometry::simple(
            self.viewport_height,
            self.document_height,
            self.scroll_offset.get(),
        ))
    }
}

/// Signal source backed by a queue.
#[derive(Default)]
pub struct QueueSource {
    queue: VecDeque<ScrollSignal>,
    pub detached: bool,
}

impl QueueSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: ScrollSignal) {
        if !self.detached {
            self.queue.push_back(signal);
        }
    }
}

impl ScrollEventSource for QueueSource {
    fn poll_signals(&mut self) -> Vec<ScrollSignal> {
        self.queue.drain(..).collect()
    }

    fn detach(&mut self) {
        self.detached = true;
        self.queue.clear();
    }
}
