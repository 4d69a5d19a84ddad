//! Damped spring driving a card's normalized animation progress.
//!
//! Every card animation runs a spring from `0.0` (where the card was released)
//! to `1.0` (its spring target); the card maps that progress onto its
//! transform. Underdamped configs overshoot `1.0` and oscillate back, which
//! gives a thrown-in card its bounce.
//!
//! # Rest detection
//!
//! A spring is at rest once `|1 - position| < REST_DISPLACEMENT` and
//! `|velocity| < REST_VELOCITY`. At that point it snaps to exactly `1.0` so
//! the card lands on its target without a residual sub-pixel error.

use std::time::Duration;

/// Maximum dt per integration step (4ms). Larger deltas are subdivided, and
/// stiff or heavily damped configs use a smaller step still.
const MAX_STEP_SECS: f32 = 0.004;

/// Longest frame a single tick will simulate. Longer gaps (a stalled host, a
/// backgrounded tab) are treated as this long.
const MAX_TICK_SECS: f32 = 0.064;

/// Displacement from the target below which the spring may rest.
pub const REST_DISPLACEMENT: f32 = 0.001;

/// Speed (progress units per second) below which the spring may rest.
pub const REST_VELOCITY: f32 = 0.001;

const MIN_STIFFNESS: f32 = 0.1;
const MAX_STIFFNESS: f32 = 1.0e6;
const MIN_DAMPING: f32 = 0.1;
const MAX_DAMPING: f32 = 1.0e4;
const MIN_MASS: f32 = 0.01;
const MAX_MASS: f32 = 100.0;

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

impl SpringConfig {
    /// Spring used to settle a card back into the stack.
    /// Origami tension 250, friction 10.
    pub const THROW_IN: Self = Self {
        mass: 1.0,
        stiffness: 990.4,
        damping: 31.0,
    };

    /// Spring used to eject a card from the stack.
    /// Origami tension 500, friction 20.
    pub const THROW_OUT: Self = Self {
        mass: 1.0,
        stiffness: 1895.4,
        damping: 61.0,
    };

    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            mass: 1.0,
            stiffness,
            damping,
        }
    }

    /// Convert Origami/Quartz Composer tension and friction values, the units
    /// designers usually hand over, into physical stiffness and damping.
    pub fn from_origami(tension: f32, friction: f32) -> Self {
        let stiffness = if tension == 0.0 {
            0.0
        } else {
            (tension - 30.0) * 3.62 + 194.0
        };
        let damping = if friction == 0.0 {
            0.0
        } else {
            (friction - 8.0) * 3.0 + 25.0
        };
        Self::new(stiffness, damping)
    }

    /// Damping at which this spring converges fastest without overshoot.
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Stiffness, damping and mass clamped into finite positive ranges.
    /// NaN falls back to the lower bound, or to unit mass.
    fn sanitized(self) -> Self {
        let mass = if self.mass.is_nan() { 1.0 } else { self.mass };
        Self {
            mass: mass.clamp(MIN_MASS, MAX_MASS),
            stiffness: self.stiffness.max(MIN_STIFFNESS).min(MAX_STIFFNESS),
            damping: self.damping.max(MIN_DAMPING).min(MAX_DAMPING),
        }
    }

    /// Largest integration step that keeps semi-implicit Euler stable for
    /// this config: `(c/m)·dt + sqrt(k/m)·dt <= 1`.
    fn max_step(&self) -> f32 {
        let rate = self.damping / self.mass + (self.stiffness / self.mass).sqrt();
        if rate > 0.0 {
            (1.0 / rate).min(MAX_STEP_SECS)
        } else {
            MAX_STEP_SECS
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::THROW_IN
    }
}

/// A spring animating progress from 0.0 toward 1.0.
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    /// Current position (0.0 = start, 1.0 = target)
    position: f32,
    velocity: f32,
    at_rest: bool,
}

impl Spring {
    /// Create a spring that is at rest until [`start`](Self::start)ed.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config: config.sanitized(),
            position: 0.0,
            velocity: 0.0,
            at_rest: true,
        }
    }

    /// Restart from progress 0.0 toward 1.0 with a new config.
    pub fn start(&mut self, config: SpringConfig) {
        self.config = config.sanitized();
        self.position = 0.0;
        self.velocity = 0.0;
        self.at_rest = false;
    }

    /// Stop in place. No further progress is produced until restarted.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.at_rest = true;
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Perform a single semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f32) {
        // Spring force: F = -k * x
        let displacement = self.position - 1.0;
        let spring_force = -self.config.stiffness * displacement;

        // Damping force: F = -c * v
        let damping_force = -self.config.damping * self.velocity;

        let acceleration = (spring_force + damping_force) / self.config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the simulation by `dt`. Returns true if the position moved.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return false;
        }

        let total_secs = dt.as_secs_f32().min(MAX_TICK_SECS);
        if total_secs <= 0.0 {
            return false;
        }

        let max_step = self.config.max_step();
        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(max_step);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if !self.position.is_finite() || !self.velocity.is_finite() {
            log::warn!("spring diverged with {:?}, snapping to target", self.config);
            self.position = 1.0;
            self.velocity = 0.0;
            self.at_rest = true;
        } else if (1.0 - self.position).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_VELOCITY
        {
            self.position = 1.0;
            self.velocity = 0.0;
            self.at_rest = true;
        }

        true
    }
}
