//! Ready-made [`EventSink`] implementations.

use std::io::Write;

use crate::backend::EventSink;
use crate::event::MilestoneEvent;

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<MilestoneEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitted milestone values, in emission order.
    pub fn milestones(&self) -> Vec<u8> {
        self.events.iter().map(MilestoneEvent::milestone).collect()
    }

    /// Emitted `scroll_threshold` labels, in emission order.
    pub fn labels(&self) -> Vec<&str> {
        self.events
            .iter()
            .map(|e| e.scroll_threshold.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MilestoneEvent) {
        self.events.push(event.clone());
    }
}

/// Reports each event through the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &MilestoneEvent) {
        log::info!(
            "{} {}{} {}",
            event.event_kind,
            event.scroll_threshold,
            event.scroll_units,
            event.scroll_direction
        );
    }
}

/// Writes one JSON object per line.
///
/// Write failures are logged and counted, never returned.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    failures: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failures: 0,
        }
    }

    /// Number of events that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, event: &MilestoneEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: &MilestoneEvent) {
        if let Err(e) = self.write_line(event) {
            self.failures += 1;
            log::warn!(
                "Dropping milestone {} event: {e}",
                event.scroll_threshold
            );
        }
    }
}

/// Forwards every event to each inner sink, in insertion order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn emit(&mut self, event: &MilestoneEvent) {
        for sink in &mut self.sinks {
            sink.emit(event);
        }
    }
}
