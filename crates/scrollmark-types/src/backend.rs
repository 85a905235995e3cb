//! Collaborator trait definitions.
//!
//! Every host implements these traits. The tracker dispatches all I/O through
//! trait boundaries: it never queries page geometry, registers listeners or
//! talks to an analytics transport directly.

use crate::error::Result;
use crate::event::MilestoneEvent;
use crate::signal::ScrollSignal;

/// Height measurements reported for one page element (root or body).
///
/// All values are CSS pixels. Hosts report `0.0` for anything they cannot
/// measure; zero is treated as "absent" wherever a fallback exists.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementBox {
    pub scroll_height: f64,
    pub offset_height: f64,
    pub client_height: f64,
    pub scroll_top: f64,
}

impl ElementBox {
    /// Tallest of the three height readings.
    pub fn max_height(&self) -> f64 {
        self.scroll_height
            .max(self.offset_height)
            .max(self.client_height)
    }
}

/// A snapshot of viewport and document geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportGeometry {
    /// Window inner height.
    pub inner_height: f64,
    /// Window vertical page offset.
    pub page_y_offset: f64,
    /// Root (document) element, if the host has one.
    pub root: Option<ElementBox>,
    pub body: ElementBox,
    /// Explicit document height reported by the host, preferred when set.
    pub explicit_height: Option<f64>,
}

impl ViewportGeometry {
    /// Geometry for a page whose readings all agree.
    pub fn simple(viewport_height: f64, document_height: f64, scroll_offset: f64) -> Self {
        let element = ElementBox {
            scroll_height: document_height,
            offset_height: document_height,
            client_height: viewport_height,
            scroll_top: scroll_offset,
        };
        Self {
            inner_height: viewport_height,
            page_y_offset: scroll_offset,
            root: Some(element),
            body: element,
            explicit_height: None,
        }
    }
}

/// Read-only access to the current viewport geometry.
pub trait ViewportMetrics {
    /// Measure the page as of now.
    ///
    /// Fails with `MetricsUnavailable` when the host cannot measure
    /// (e.g. the document was torn down).
    fn measure(&self) -> Result<ViewportGeometry>;
}

/// Receiver of confirmed milestone events.
///
/// Delivery is fire-and-forget: a sink handles its own failures and never
/// reports them back to the tracker.
pub trait EventSink {
    fn emit(&mut self, event: &MilestoneEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &MilestoneEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &MilestoneEvent) {
        (**self).emit(event);
    }
}

/// Source of "measure now" signals (scroll, touch-move, resize).
pub trait ScrollEventSource {
    /// Drain pending signals in arrival order.
    fn poll_signals(&mut self) -> Vec<ScrollSignal>;

    /// Stop listening. No signals are produced after this returns.
    fn detach(&mut self);
}
