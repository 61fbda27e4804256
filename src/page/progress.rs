/// Smoothed page scroll progress for the top progress bar.

/// Spring parameters for the displayed value.
#[derive(Debug, Clone, Copy)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance to target below which the spring may settle.
    pub rest_delta: f64,
    /// Speed below which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

/// Integration step; frames are split into steps no longer than this.
const MAX_STEP_SECS: f64 = 1.0 / 240.0;

pub struct ScrollProgressTracker {
    config: SpringConfig,
    target: f64,
    value: f64,
    velocity: f64,
}

impl ScrollProgressTracker {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            target: 0.0,
            value: 0.0,
            velocity: 0.0,
        }
    }

    /// Set the raw normalized progress to chase. Clamped to [0, 1].
    pub fn set_target(&mut self, progress: f64) {
        self.target = progress.clamp(0.0, 1.0);
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Displayed value, kept in [0, 1].
    pub fn value(&self) -> f64 {
        self.value.clamp(0.0, 1.0)
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    /// Advance the spring by `delta_ms`.
    pub fn advance(&mut self, delta_ms: f64) {
        if self.is_at_rest() {
            return;
        }
        let mut remaining = (delta_ms / 1000.0).max(0.0);
        let c = self.config;
        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP_SECS);
            let force = -c.stiffness * (self.value - self.target) - c.damping * self.velocity;
            self.velocity += force / c.mass * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }
        if (self.value - self.target).abs() < c.rest_delta && self.velocity.abs() < c.rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Filled cells of a `width`-cell bar.
    pub fn bar_cells(&self, width: u16) -> u16 {
        (self.value() * width as f64).round() as u16
    }
}
