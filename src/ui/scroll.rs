//! Scrollback autoscroll
//!
//! Whenever the scrollback changes, the display checks whether its
//! content has outgrown the viewport. If so it turns on the scrolling
//! affordance and snaps to the bottom so the newest command stays in view.

/// Heights measured on the rendering surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Height of the rendered command entries
    pub content_height: f32,
    /// Height of the scrollable viewport around them
    pub viewport_height: f32,
    /// Height of the whole window
    pub window_height: f32,
    /// Total scrollable height of the viewport
    pub scroll_height: f32,
}

/// Surface the scrollback is drawn on
pub trait ScrollSurface {
    /// Measure the current layout
    fn metrics(&self) -> ScrollMetrics;

    /// Toggle the scrolling affordance
    fn set_scrolling(&mut self, scrolling: bool);

    /// Set the viewport's scroll offset
    fn scroll_to(&mut self, offset: f32);
}

/// Outcome of one autoscroll pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDecision {
    /// Whether the viewport needs to scroll
    pub scrolling: bool,
    /// Offset snapped to, if any
    pub scroll_top: Option<f32>,
}

/// Decide scrolling from measured heights.
///
/// Content taller than the window counts as overflowing even when the
/// viewport reports otherwise.
pub fn decide(metrics: &ScrollMetrics, snap: bool) -> ScrollDecision {
    let scrolling = metrics.content_height > metrics.viewport_height
        || metrics.window_height < metrics.content_height;

    ScrollDecision {
        scrolling,
        scroll_top: (scrolling && snap).then_some(metrics.scroll_height),
    }
}

/// Applies autoscroll decisions to a surface
#[derive(Debug, Clone)]
pub struct AutoScroll {
    /// Snap to the bottom when scrolling is needed
    snap_to_bottom: bool,
    /// Most recent decision
    last: Option<ScrollDecision>,
}

impl AutoScroll {
    pub fn new(snap_to_bottom: bool) -> Self {
        Self {
            snap_to_bottom,
            last: None,
        }
    }

    /// Measure the surface and apply the resulting decision
    pub fn apply<S: ScrollSurface>(&mut self, surface: &mut S) -> ScrollDecision {
        let decision = decide(&surface.metrics(), self.snap_to_bottom);

        surface.set_scrolling(decision.scrolling);
        if let Some(offset) = decision.scroll_top {
            surface.scroll_to(offset);
        }

        if self.last.map(|d| d.scrolling) != Some(decision.scrolling) {
            debug!("Scrollback scrolling: {}", decision.scrolling);
        }
        self.last = Some(decision);
        decision
    }

    pub fn last_decision(&self) -> Option<ScrollDecision> {
        self.last
    }

    pub fn snap_to_bottom(&self) -> bool {
        self.snap_to_bottom
    }

    pub fn set_snap_to_bottom(&mut self, enabled: bool) {
        self.snap_to_bottom = enabled;
    }
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new(true)
    }
}

/// In-memory surface with settable heights
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualViewport {
    pub content_height: f32,
    pub viewport_height: f32,
    pub window_height: f32,
    pub scrolling: bool,
    pub scroll_top: f32,
}

impl VirtualViewport {
    pub fn new(viewport_height: f32, window_height: f32) -> Self {
        Self {
            viewport_height,
            window_height,
            ..Self::default()
        }
    }
}

impl ScrollSurface for VirtualViewport {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            content_height: self.content_height,
            viewport_height: self.viewport_height,
            window_height: self.window_height,
            scroll_height: self.content_height.max(self.viewport_height),
        }
    }

    fn set_scrolling(&mut self, scrolling: bool) {
        self.scrolling = scrolling;
    }

    fn scroll_to(&mut self, offset: f32) {
        self.scroll_top = offset;
    }
}
