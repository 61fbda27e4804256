//! Frame clock fed from `performance.now()`.
//!
//! `draw_web()` calls at ~60fps with variable delta. FrameClock keeps the
//! latest wall-clock timestamp (what timers compare deadlines against) and
//! hands animations a clamped per-frame delta, so physics never jumps when a
//! backgrounded tab comes back.

/// Largest delta handed to animations in one frame (ms).
const MAX_FRAME_DELTA_MS: f64 = 100.0;

pub struct FrameClock {
    /// Timestamp of the last update (ms), None before the first frame
    last_timestamp: Option<f64>,
    /// Total frames seen since creation
    pub frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            frames: 0,
        }
    }

    /// Feed wall-clock timestamp. Returns the animation delta in ms.
    ///
    /// The first frame yields 0. Time going backwards yields 0.
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        self.frames += 1;
        delta
    }

    /// Latest timestamp fed to `update`, or 0 before the first frame.
    pub fn now_ms(&self) -> f64 {
        self.last_timestamp.unwrap_or(0.0)
    }
}

/// Read `performance.now()`. Off wasm there is no page clock, so 0.
#[cfg(target_arch = "wasm32")]
pub fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(dead_code)]
pub fn performance_now() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.update(1234.0), 0.0);
        assert_eq!(clock.now_ms(), 1234.0);
    }

    #[test]
    fn delta_between_frames() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        assert!((clock.update(16.5) - 16.5).abs() < 1e-9);
        assert_eq!(clock.frames, 2);
    }

    #[test]
    fn clamp_large_delta() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        // Tab backgrounded for 10s → animation sees at most one clamp window
        assert_eq!(clock.update(10_000.0), MAX_FRAME_DELTA_MS);
        // ...but timers see the real timestamp
        assert_eq!(clock.now_ms(), 10_000.0);
    }

    #[test]
    fn backwards_time_is_zero_delta() {
        let mut clock = FrameClock::new();
        clock.update(500.0);
        assert_eq!(clock.update(400.0), 0.0);
    }

    #[test]
    fn now_before_first_frame() {
        let clock = FrameClock::new();
        assert_eq!(clock.now_ms(), 0.0);
    }
}
