//! Simulated page viewport for trace replay.

use scrollmark_core::backend::{ViewportGeometry, ViewportMetrics};
use scrollmark_core::error::{Result, ScrollmarkError};

/// Scroll state of a simulated page.
#[derive(Debug, Clone)]
pub struct PageViewport {
    /// Current vertical scroll offset in pixels.
    pub scroll_y: i32,
    /// Total document height.
    pub content_height: i32,
    /// Visible viewport height.
    pub viewport_height: i32,
}

impl PageViewport {
    pub fn new(viewport_height: i32, content_height: i32) -> Self {
        Self {
            scroll_y: 0,
            content_height,
            viewport_height,
        }
    }

    /// Scroll to an absolute position.
    pub fn scroll_to(&mut self, y: i32) {
        self.scroll_y = y;
        self.clamp();
    }

    /// Update content height (after reflow).
    pub fn set_content_height(&mut self, height: i32) {
        self.content_height = height;
        self.clamp();
    }

    /// Update viewport height (after window resize).
    pub fn set_viewport_height(&mut self, height: i32) {
        self.viewport_height = height;
        self.clamp();
    }

    /// Get the maximum scroll offset.
    pub fn max_scroll(&self) -> i32 {
        (self.content_height - self.viewport_height).max(0)
    }

    /// Clamp scroll_y to valid range [0, max_scroll].
    fn clamp(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll());
    }

    /// Is at bottom?
    pub fn at_bottom(&self) -> bool {
        self.scroll_y >= self.max_scroll()
    }
}

impl ViewportMetrics for PageViewport {
    fn measure(&self) -> Result<ViewportGeometry> {
        if self.viewport_height <= 0 {
            return Err(ScrollmarkError::MetricsUnavailable(
                "viewport has no height".into(),
            ));
        }
        Ok(ViewportGeometry::simple(
            f64::from(self.viewport_height),
            f64::from(self.content_height),
            f64::from(self.scroll_y),
        ))
    }
}
