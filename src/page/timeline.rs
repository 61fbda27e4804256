/// Scroll-linked fade/slide for the experience timeline.
///
/// Progress runs from 0 when the section's top edge meets the viewport's
/// bottom edge to 1 when its bottom edge meets the viewport's top edge. It is
/// recomputed from scratch every frame; nothing accumulates.

/// Sampling points shared by both output curves.
pub const PROGRESS_STOPS: [f64; 4] = [0.0, 0.2, 0.8, 1.0];
pub const OPACITY_STOPS: [f64; 4] = [0.0, 1.0, 1.0, 0.0];
/// Vertical offset in px; positive is down.
pub const OFFSET_Y_STOPS: [f64; 4] = [50.0, 0.0, 0.0, -50.0];

/// Piecewise-linear interpolation over `(xs[i], ys[i])`, clamped to the end
/// values outside `xs`. `xs` must be ascending.
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    for i in 1..n {
        if x <= xs[i] {
            let span = xs[i] - xs[i - 1];
            if span <= 0.0 {
                return ys[i];
            }
            let t = (x - xs[i - 1]) / span;
            return ys[i - 1] + (ys[i] - ys[i - 1]) * t;
        }
    }
    ys[n - 1]
}

/// Raw scroll progress of a section through the viewport, in [0, 1].
pub fn section_progress(
    scroll_offset: f64,
    viewport_height: f64,
    section_top: f64,
    section_height: f64,
) -> f64 {
    let travel = section_height + viewport_height;
    if travel <= 0.0 {
        return 0.0;
    }
    ((scroll_offset + viewport_height - section_top) / travel).clamp(0.0, 1.0)
}

/// Presentation values for the timeline region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineFrame {
    pub progress: f64,
    pub opacity: f64,
    pub offset_y_px: f64,
}

impl TimelineFrame {
    pub fn at(progress: f64) -> Self {
        Self {
            progress,
            opacity: interpolate(progress, &PROGRESS_STOPS, &OPACITY_STOPS),
            offset_y_px: interpolate(progress, &PROGRESS_STOPS, &OFFSET_Y_STOPS),
        }
    }

    /// Frame for a section laid out at `section_top..section_top + section_height`.
    pub fn for_section(
        scroll_offset: f64,
        viewport_height: f64,
        section_top: f64,
        section_height: f64,
    ) -> Self {
        Self::at(section_progress(
            scroll_offset,
            viewport_height,
            section_top,
            section_height,
        ))
    }

    /// Offset rounded to whole grid rows.
    pub fn offset_rows(&self, cell_height_px: f64) -> i32 {
        (self.offset_y_px / cell_height_px).round() as i32
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_opacity_in_unit_range(r in -1.0f64..2.0) {
            let o = TimelineFrame::at(r).opacity;
            prop_assert!((0.0..=1.0).contains(&o));
        }

        #[test]
        fn prop_opacity_matches_piecewise_definition(r in 0.0f64..=1.0) {
            let o = TimelineFrame::at(r).opacity;
            let expected = if r < 0.2 {
                r / 0.2
            } else if r <= 0.8 {
                1.0
            } else {
                (1.0 - r) / 0.2
            };
            prop_assert!((o - expected).abs() < 1e-9, "r={} o={} expected={}", r, o, expected);
        }

        #[test]
        fn prop_progress_clamped(scroll in -5000.0f64..20000.0, top in 0.0f64..10000.0, h in 1.0f64..3000.0) {
            let p = section_progress(scroll, 600.0, top, h);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
