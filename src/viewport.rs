//! Viewport metrics: the single owner of the page scroll position.
//!
//! Every scroll source (wheel, keys, in-page navigation) goes through
//! [`Viewport`], and consumers read derived [`ScrollMetrics`] from it instead
//! of querying the browser themselves. Offsets are CSS pixels; the grid maps
//! them onto rows with [`CELL_HEIGHT_PX`].

use tachyonfx::Interpolation;

/// DomBackend renders each grid row as a 15px tall `<pre>`.
pub const CELL_HEIGHT_PX: f64 = 15.0;

/// Duration of smooth in-page navigation.
const SMOOTH_SCROLL_MS: f64 = 400.0;

/// Scroll state derived from the current offset and layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Vertical scroll offset (px), always >= 0.
    pub absolute_offset_px: f64,
    /// `offset / (document - viewport)` in [0, 1]; 0 when nothing scrolls.
    pub normalized_progress: f64,
}

#[derive(Debug, Clone)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    elapsed_ms: f64,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    offset_px: f64,
    viewport_height_px: f64,
    document_height_px: f64,
    animation: Option<ScrollAnimation>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            offset_px: 0.0,
            viewport_height_px: 0.0,
            document_height_px: 0.0,
            animation: None,
        }
    }

    /// Update layout dimensions (px). The offset is re-clamped.
    pub fn resize(&mut self, viewport_height_px: f64, document_height_px: f64) {
        self.viewport_height_px = viewport_height_px.max(0.0);
        self.document_height_px = document_height_px.max(0.0);
        let max = self.max_offset();
        self.offset_px = self.offset_px.clamp(0.0, max);
        if let Some(anim) = &mut self.animation {
            anim.to = anim.to.clamp(0.0, max);
        }
    }

    pub fn viewport_height_px(&self) -> f64 {
        self.viewport_height_px
    }

    pub fn document_height_px(&self) -> f64 {
        self.document_height_px
    }

    pub fn max_offset(&self) -> f64 {
        (self.document_height_px - self.viewport_height_px).max(0.0)
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Manual scroll by `delta_px`. Cancels any smooth scroll in flight.
    pub fn scroll_by(&mut self, delta_px: f64) {
        self.animation = None;
        self.offset_px = self.clamp(self.offset_px + delta_px);
    }

    /// Jump straight to `offset_px`.
    pub fn scroll_to(&mut self, offset_px: f64) {
        self.animation = None;
        self.offset_px = self.clamp(offset_px);
    }

    /// Start a smooth scroll towards `offset_px`. Fire-and-forget: nothing
    /// reports completion, and a later manual scroll simply overrides it.
    pub fn smooth_scroll_to(&mut self, offset_px: f64) {
        let to = self.clamp(offset_px);
        if (to - self.offset_px).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.offset_px,
            to,
            elapsed_ms: 0.0,
        });
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the smooth scroll by one frame.
    pub fn advance(&mut self, delta_ms: f64) {
        let Some(anim) = &mut self.animation else {
            return;
        };
        anim.elapsed_ms += delta_ms;
        let t = (anim.elapsed_ms / SMOOTH_SCROLL_MS).clamp(0.0, 1.0);
        let done = t >= 1.0;
        let target = if done {
            anim.to
        } else {
            let eased = Interpolation::CubicOut.alpha(t as f32) as f64;
            anim.from + (anim.to - anim.from) * eased
        };
        self.offset_px = self.clamp(target);
        if done {
            self.animation = None;
        }
    }

    pub fn metrics(&self) -> ScrollMetrics {
        let max = self.max_offset();
        let normalized_progress = if max > 0.0 {
            (self.offset_px / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        ScrollMetrics {
            absolute_offset_px: self.offset_px,
            normalized_progress,
        }
    }

    /// First document row visible at the top of the viewport.
    pub fn offset_rows(&self) -> u16 {
        (self.offset_px / CELL_HEIGHT_PX).floor() as u16
    }
}

/// Convert a row count to CSS pixels.
pub fn rows_to_px(rows: u16) -> f64 {
    rows as f64 * CELL_HEIGHT_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(viewport_rows: u16, doc_rows: u16) -> Viewport {
        let mut v = Viewport::new();
        v.resize(rows_to_px(viewport_rows), rows_to_px(doc_rows));
        v
    }

    #[test]
    fn starts_at_top() {
        let v = viewport(20, 100);
        let m = v.metrics();
        assert_eq!(m.absolute_offset_px, 0.0);
        assert_eq!(m.normalized_progress, 0.0);
    }

    #[test]
    fn progress_is_offset_over_scrollable_range() {
        let mut v = viewport(20, 100); // 80 rows scrollable
        v.scroll_to(rows_to_px(40));
        assert!((v.metrics().normalized_progress - 0.5).abs() < 1e-9);
        v.scroll_to(rows_to_px(80));
        assert_eq!(v.metrics().normalized_progress, 1.0);
    }

    #[test]
    fn scroll_clamps_to_document() {
        let mut v = viewport(20, 100);
        v.scroll_by(-500.0);
        assert_eq!(v.metrics().absolute_offset_px, 0.0);
        v.scroll_by(1_000_000.0);
        assert_eq!(v.metrics().absolute_offset_px, rows_to_px(80));
    }

    #[test]
    fn short_document_never_scrolls() {
        let mut v = viewport(50, 30);
        v.scroll_by(300.0);
        let m = v.metrics();
        assert_eq!(m.absolute_offset_px, 0.0);
        assert_eq!(m.normalized_progress, 0.0);
    }

    #[test]
    fn shrinking_document_reclamps_offset() {
        let mut v = viewport(20, 100);
        v.scroll_to(rows_to_px(80));
        v.resize(rows_to_px(20), rows_to_px(50));
        assert_eq!(v.metrics().absolute_offset_px, rows_to_px(30));
    }

    #[test]
    fn shrinking_mid_scroll_retargets_animation() {
        let mut v = viewport(20, 100);
        v.smooth_scroll_to(rows_to_px(80));
        v.advance(100.0);
        assert!(v.is_animating());
        v.resize(rows_to_px(20), rows_to_px(50));
        assert!(v.metrics().absolute_offset_px <= rows_to_px(30));
        v.advance(1000.0);
        assert!(!v.is_animating());
        assert_eq!(v.metrics().absolute_offset_px, rows_to_px(30));
    }

    #[test]
    fn offset_rows_floors() {
        let mut v = viewport(20, 100);
        v.scroll_to(CELL_HEIGHT_PX * 3.0 + 14.0);
        assert_eq!(v.offset_rows(), 3);
    }

    #[test]
    fn smooth_scroll_reaches_target() {
        let mut v = viewport(20, 100);
        v.smooth_scroll_to(rows_to_px(40));
        assert!(v.is_animating());
        v.advance(200.0);
        let mid = v.metrics().absolute_offset_px;
        assert!(mid > 0.0 && mid < rows_to_px(40), "mid = {mid}");
        v.advance(250.0);
        assert!(!v.is_animating());
        assert_eq!(v.metrics().absolute_offset_px, rows_to_px(40));
    }

    #[test]
    fn manual_scroll_cancels_smooth_scroll() {
        let mut v = viewport(20, 100);
        v.smooth_scroll_to(rows_to_px(60));
        v.advance(100.0);
        v.scroll_by(CELL_HEIGHT_PX);
        assert!(!v.is_animating());
        let here = v.metrics().absolute_offset_px;
        v.advance(1000.0);
        assert_eq!(v.metrics().absolute_offset_px, here);
    }

    #[test]
    fn smooth_scroll_to_current_offset_is_noop() {
        let mut v = viewport(20, 100);
        v.smooth_scroll_to(0.0);
        assert!(!v.is_animating());
    }
}
