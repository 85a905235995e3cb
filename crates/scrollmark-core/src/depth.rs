//! Percent-of-page-viewed calculation.
//!
//! Hosts disagree about which element carries the real document height, so
//! every candidate is consulted and the largest wins. Window height and
//! scroll offset use fallback chains in which a zero reading counts as
//! "not reported".

use crate::backend::{ViewportGeometry, ViewportMetrics};
use crate::error::{Result, ScrollmarkError};

/// `Some(v)` unless the reading is zero or NaN.
fn reported(v: f64) -> Option<f64> {
    (v != 0.0 && !v.is_nan()).then_some(v)
}

/// Full document height: the explicit override if present, otherwise the
/// tallest of the root and body scroll/offset/client heights.
pub fn document_height(g: &ViewportGeometry) -> f64 {
    if let Some(h) = g.explicit_height.and_then(reported) {
        return h;
    }
    let body = g.body.max_height();
    match g.root {
        Some(root) => body.max(root.max_height()),
        None => body,
    }
}

/// Visible viewport height.
pub fn viewport_height(g: &ViewportGeometry) -> f64 {
    let element = g.root.unwrap_or(g.body);
    reported(g.inner_height)
        .or_else(|| reported(element.client_height))
        .or_else(|| reported(g.body.client_height))
        .unwrap_or(0.0)
}

/// Distance scrolled from the top of the document.
pub fn scroll_offset(g: &ViewportGeometry) -> f64 {
    let element = g.root.unwrap_or(g.body);
    reported(g.page_y_offset)
        .or_else(|| reported(element.scroll_top))
        .or_else(|| reported(g.body.scroll_top))
        .unwrap_or(0.0)
}

/// Percent of the document above the bottom edge of the viewport, rounded
/// half away from zero.
///
/// The result is nominally 0..=100 but can stray slightly outside during
/// reflow; callers compare against thresholds and need no clamping.
pub fn percent_viewed(g: &ViewportGeometry) -> Result<i32> {
    let document = document_height(g);
    if !(document.is_finite() && document > 0.0) {
        return Err(ScrollmarkError::MetricsUnavailable(format!(
            "document height is {document}"
        )));
    }

    let pixels_below = document - (viewport_height(g) + scroll_offset(g));
    let percent_below_fold = 100.0 * (pixels_below / document);
    let viewed = (100.0 - percent_below_fold).round();
    if !viewed.is_finite() {
        return Err(ScrollmarkError::MetricsUnavailable(
            "geometry produced a non-finite depth".into(),
        ));
    }
    Ok(viewed as i32)
}

/// Measure the page and compute its depth in one step.
pub fn measure<M: ViewportMetrics + ?Sized>(metrics: &M) -> Result<i32> {
    percent_viewed(&metrics.measure()?)
}
