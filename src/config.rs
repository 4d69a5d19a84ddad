//! Stack defaults and per-card overrides.
//!
//! A [`Stack`](crate::Stack) holds one [`Config`]; every card gets its own
//! copy, optionally overridden field by field through a [`CardConfig`].
//! Once a card is created its config never changes.
//!
//! ```ignore
//! let mut stack = Stack::new(
//!     Config::default()
//!         .with_allowed_directions(Directions::HORIZONTAL)
//!         .with_max_rotation(15.0),
//! );
//! let card = stack.create_card_with_config(
//!     Box::new(surface),
//!     CardConfig::default().throw_out_confidence_threshold(0.8),
//!     false,
//! );
//! ```

use std::fmt;
use std::rc::Rc;

use crate::animation::SpringConfig;
use crate::direction::Directions;
use crate::throw::{
    ConfidenceThreshold, IsThrowOut, LinearRotation, ProportionalConfidence, Rotation,
    SurfaceTransform, ThrowOutConfidence, ThrowOutDistance, Transform, UniformDistance,
};

const DEFAULT_MIN_THROW_OUT_DISTANCE: f32 = 400.0;
const DEFAULT_MAX_THROW_OUT_DISTANCE: f32 = 500.0;

#[derive(Clone)]
pub struct Config {
    /// Directions a card may be thrown out in. A release whose dominant
    /// direction is not listed always throws in.
    pub allowed_directions: Directions,
    /// Largest rotation, in degrees, a dragged card is tilted by.
    pub max_rotation: f32,
    pub min_throw_out_distance: f32,
    pub max_throw_out_distance: f32,
    /// Confidence at or above which a release throws out, in `[0, 1]`.
    pub throw_out_confidence_threshold: f32,
    pub throw_in_spring: SpringConfig,
    pub throw_out_spring: SpringConfig,
    pub is_throw_out: Rc<dyn IsThrowOut>,
    pub rotation: Rc<dyn Rotation>,
    pub throw_out_confidence: Rc<dyn ThrowOutConfidence>,
    pub throw_out_distance: Rc<dyn ThrowOutDistance>,
    pub transform: Rc<dyn Transform>,
}

impl Config {
    pub fn with_allowed_directions(mut self, directions: Directions) -> Self {
        self.allowed_directions = directions;
        self
    }

    pub fn with_max_rotation(mut self, degrees: f32) -> Self {
        self.max_rotation = degrees;
        self
    }

    /// Range the ejection distance is sampled from.
    pub fn with_throw_out_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_throw_out_distance = min;
        self.max_throw_out_distance = max;
        self
    }

    pub fn with_throw_out_confidence_threshold(mut self, threshold: f32) -> Self {
        self.throw_out_confidence_threshold = threshold;
        self
    }

    pub fn with_throw_in_spring(mut self, spring: SpringConfig) -> Self {
        self.throw_in_spring = spring;
        self
    }

    pub fn with_throw_out_spring(mut self, spring: SpringConfig) -> Self {
        self.throw_out_spring = spring;
        self
    }

    pub fn with_is_throw_out(mut self, strategy: impl IsThrowOut + 'static) -> Self {
        self.is_throw_out = Rc::new(strategy);
        self
    }

    pub fn with_rotation(mut self, strategy: impl Rotation + 'static) -> Self {
        self.rotation = Rc::new(strategy);
        self
    }

    pub fn with_throw_out_confidence(mut self, strategy: impl ThrowOutConfidence + 'static) -> Self {
        self.throw_out_confidence = Rc::new(strategy);
        self
    }

    pub fn with_throw_out_distance(mut self, strategy: impl ThrowOutDistance + 'static) -> Self {
        self.throw_out_distance = Rc::new(strategy);
        self
    }

    pub fn with_transform(mut self, strategy: impl Transform + 'static) -> Self {
        self.transform = Rc::new(strategy);
        self
    }

    /// Apply per-card overrides on top of these defaults and normalize the
    /// result.
    pub fn merge(&self, overrides: &CardConfig) -> Config {
        let mut config = self.clone();
        if let Some(directions) = overrides.allowed_directions {
            config.allowed_directions = directions;
        }
        if let Some(max_rotation) = overrides.max_rotation {
            config.max_rotation = max_rotation;
        }
        if let Some(min) = overrides.min_throw_out_distance {
            config.min_throw_out_distance = min;
        }
        if let Some(max) = overrides.max_throw_out_distance {
            config.max_throw_out_distance = max;
        }
        if let Some(threshold) = overrides.throw_out_confidence_threshold {
            config.throw_out_confidence_threshold = threshold;
        }
        if let Some(spring) = overrides.throw_in_spring {
            config.throw_in_spring = spring;
        }
        if let Some(spring) = overrides.throw_out_spring {
            config.throw_out_spring = spring;
        }
        if let Some(ref strategy) = overrides.is_throw_out {
            config.is_throw_out = Rc::clone(strategy);
        }
        if let Some(ref strategy) = overrides.rotation {
            config.rotation = Rc::clone(strategy);
        }
        if let Some(ref strategy) = overrides.throw_out_confidence {
            config.throw_out_confidence = Rc::clone(strategy);
        }
        if let Some(ref strategy) = overrides.throw_out_distance {
            config.throw_out_distance = Rc::clone(strategy);
        }
        if let Some(ref strategy) = overrides.transform {
            config.transform = Rc::clone(strategy);
        }
        config.normalized()
    }

    /// Clamp values into their valid ranges, logging anything that had to be
    /// corrected.
    pub(crate) fn normalized(mut self) -> Config {
        let threshold = self.throw_out_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            let clamped = if threshold.is_nan() {
                0.5
            } else {
                threshold.clamp(0.0, 1.0)
            };
            log::warn!(
                "throw-out confidence threshold {} outside [0, 1], using {}",
                threshold,
                clamped
            );
            self.throw_out_confidence_threshold = clamped;
        }
        if !self.min_throw_out_distance.is_finite() || !self.max_throw_out_distance.is_finite() {
            log::warn!(
                "throw-out distance range [{}, {}] is not finite, using [{}, {}]",
                self.min_throw_out_distance,
                self.max_throw_out_distance,
                DEFAULT_MIN_THROW_OUT_DISTANCE,
                DEFAULT_MAX_THROW_OUT_DISTANCE
            );
            self.min_throw_out_distance = DEFAULT_MIN_THROW_OUT_DISTANCE;
            self.max_throw_out_distance = DEFAULT_MAX_THROW_OUT_DISTANCE;
        }
        if self.min_throw_out_distance > self.max_throw_out_distance {
            log::warn!(
                "min throw-out distance {} exceeds max {}, swapping",
                self.min_throw_out_distance,
                self.max_throw_out_distance
            );
            std::mem::swap(
                &mut self.min_throw_out_distance,
                &mut self.max_throw_out_distance,
            );
        }
        if self.allowed_directions.is_empty() {
            log::debug!("no throw-out directions allowed, every release throws in");
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_directions: Directions::all(),
            max_rotation: 20.0,
            min_throw_out_distance: DEFAULT_MIN_THROW_OUT_DISTANCE,
            max_throw_out_distance: DEFAULT_MAX_THROW_OUT_DISTANCE,
            throw_out_confidence_threshold: 0.5,
            throw_in_spring: SpringConfig::THROW_IN,
            throw_out_spring: SpringConfig::THROW_OUT,
            is_throw_out: Rc::new(ConfidenceThreshold),
            rotation: Rc::new(LinearRotation),
            throw_out_confidence: Rc::new(ProportionalConfidence),
            throw_out_distance: Rc::new(UniformDistance::new()),
            transform: Rc::new(SurfaceTransform),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("allowed_directions", &self.allowed_directions)
            .field("max_rotation", &self.max_rotation)
            .field("min_throw_out_distance", &self.min_throw_out_distance)
            .field("max_throw_out_distance", &self.max_throw_out_distance)
            .field(
                "throw_out_confidence_threshold",
                &self.throw_out_confidence_threshold,
            )
            .field("throw_in_spring", &self.throw_in_spring)
            .field("throw_out_spring", &self.throw_out_spring)
            .finish_non_exhaustive()
    }
}

/// Per-card overrides. Unset fields fall back to the stack's [`Config`].
#[derive(Clone, Default)]
pub struct CardConfig {
    pub allowed_directions: Option<Directions>,
    pub max_rotation: Option<f32>,
    pub min_throw_out_distance: Option<f32>,
    pub max_throw_out_distance: Option<f32>,
    pub throw_out_confidence_threshold: Option<f32>,
    pub throw_in_spring: Option<SpringConfig>,
    pub throw_out_spring: Option<SpringConfig>,
    pub is_throw_out: Option<Rc<dyn IsThrowOut>>,
    pub rotation: Option<Rc<dyn Rotation>>,
    pub throw_out_confidence: Option<Rc<dyn ThrowOutConfidence>>,
    pub throw_out_distance: Option<Rc<dyn ThrowOutDistance>>,
    pub transform: Option<Rc<dyn Transform>>,
}

impl CardConfig {
    pub fn allowed_directions(mut self, directions: Directions) -> Self {
        self.allowed_directions = Some(directions);
        self
    }

    pub fn max_rotation(mut self, degrees: f32) -> Self {
        self.max_rotation = Some(degrees);
        self
    }

    pub fn throw_out_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_throw_out_distance = Some(min);
        self.max_throw_out_distance = Some(max);
        self
    }

    pub fn throw_out_confidence_threshold(mut self, threshold: f32) -> Self {
        self.throw_out_confidence_threshold = Some(threshold);
        self
    }

    pub fn throw_in_spring(mut self, spring: SpringConfig) -> Self {
        self.throw_in_spring = Some(spring);
        self
    }

    pub fn throw_out_spring(mut self, spring: SpringConfig) -> Self {
        self.throw_out_spring = Some(spring);
        self
    }

    pub fn is_throw_out(mut self, strategy: impl IsThrowOut + 'static) -> Self {
        self.is_throw_out = Some(Rc::new(strategy));
        self
    }

    pub fn rotation(mut self, strategy: impl Rotation + 'static) -> Self {
        self.rotation = Some(Rc::new(strategy));
        self
    }

    pub fn throw_out_confidence(mut self, strategy: impl ThrowOutConfidence + 'static) -> Self {
        self.throw_out_confidence = Some(Rc::new(strategy));
        self
    }

    pub fn throw_out_distance(mut self, strategy: impl ThrowOutDistance + 'static) -> Self {
        self.throw_out_distance = Some(Rc::new(strategy));
        self
    }

    pub fn transform(mut self, strategy: impl Transform + 'static) -> Self {
        self.transform = Some(Rc::new(strategy));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Offset, Size};
    use crate::throw::{evaluate_release, ThrowDecision, TiltRotation};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.allowed_directions, Directions::all());
        assert_eq!(config.max_rotation, 20.0);
        assert_eq!(config.min_throw_out_distance, 400.0);
        assert_eq!(config.max_throw_out_distance, 500.0);
        assert_eq!(config.throw_out_confidence_threshold, 0.5);
        assert_eq!(config.throw_in_spring, SpringConfig::THROW_IN);
        assert_eq!(config.throw_out_spring, SpringConfig::THROW_OUT);
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let defaults = Config::default().with_max_rotation(30.0);
        let merged = defaults.merge(
            &CardConfig::default()
                .allowed_directions(Directions::LEFT)
                .throw_out_confidence_threshold(0.9),
        );

        assert_eq!(merged.allowed_directions, Directions::LEFT);
        assert_eq!(merged.throw_out_confidence_threshold, 0.9);
        assert_eq!(merged.max_rotation, 30.0);
        assert_eq!(merged.min_throw_out_distance, 400.0);
    }

    #[test]
    fn test_merge_replaces_strategy() {
        let merged = Config::default().merge(&CardConfig::default().rotation(TiltRotation));
        let size = Size::new(100.0, 100.0);
        // Linear rotation would give +10 here, tilt flips it for an upward drag
        let degrees = merged.rotation.rotation(50.0, -100.0, size, merged.max_rotation);
        assert!((degrees + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_merge_normalizes() {
        let merged = Config::default().merge(
            &CardConfig::default()
                .throw_out_confidence_threshold(1.7)
                .throw_out_distance_range(600.0, 300.0),
        );
        assert_eq!(merged.throw_out_confidence_threshold, 1.0);
        assert_eq!(merged.min_throw_out_distance, 300.0);
        assert_eq!(merged.max_throw_out_distance, 600.0);
    }

    #[test]
    fn test_non_finite_distance_range_falls_back() {
        for (min, max) in [
            (400.0, f32::INFINITY),
            (f32::NAN, 500.0),
            (f32::NEG_INFINITY, f32::NAN),
        ] {
            let merged =
                Config::default().merge(&CardConfig::default().throw_out_distance_range(min, max));
            assert_eq!(merged.min_throw_out_distance, 400.0);
            assert_eq!(merged.max_throw_out_distance, 500.0);
        }
    }

    #[test]
    fn test_non_finite_distance_range_release_does_not_panic() {
        let config = Config::default()
            .with_throw_out_distance_range(400.0, f32::INFINITY)
            .normalized();
        let throw = evaluate_release(&config, Offset::new(80.0, 0.0), Size::new(100.0, 100.0));
        assert_eq!(throw.decision, ThrowDecision::Out);
        assert!((400.0..=500.0).contains(&throw.to.x));
    }

    #[test]
    fn test_debug_omits_strategies() {
        let text = format!("{:?}", Config::default());
        assert!(text.starts_with("Config {"));
        assert!(text.contains("max_rotation: 20.0"));
    }
}
