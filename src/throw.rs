//! Throw evaluation: confidence, rotation, ejection distance and the
//! release decision.
//!
//! Each formula is a strategy trait so hosts can replace the math per stack or
//! per card without touching the gesture state machine. Plain closures with
//! the matching signature implement the traits, so
//! `config.with_rotation(|x: f32, _y: f32, _size: Size, max: f32| x.signum() * max)`
//! works as well as a named type.
//!
//! ## Defaults
//!
//! - [`ProportionalConfidence`]: the larger of `|x| / width` and
//!   `|y| / height`, clamped to 1.
//! - [`ConfidenceThreshold`]: throw out iff confidence >= threshold.
//! - [`UniformDistance`]: a fresh uniform sample in `[min, max]` per throw.
//! - [`LinearRotation`]: `x / width` clamped to ±1, scaled by `max_rotation`.
//! - [`SurfaceTransform`]: hands the transform to [`Surface::set_transform`].
//!
//! A zero-sized dimension contributes 0 to confidence and rotation instead of
//! dividing by zero.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::CardTransform;
use crate::config::Config;
use crate::direction::{classify, Direction};
use crate::geometry::{Offset, Size};
use crate::surface::Surface;

/// How far, in `[0, 1]`, a drag is toward qualifying as a throw-out.
pub trait ThrowOutConfidence {
    fn throw_out_confidence(&self, offset_x: f32, offset_y: f32, size: Size) -> f32;
}

/// Whether a release at the given offset ejects the card.
///
/// `confidence` is the value the configured [`ThrowOutConfidence`] strategy
/// computed for the same offset.
pub trait IsThrowOut {
    fn is_throw_out(
        &self,
        offset_x: f32,
        offset_y: f32,
        size: Size,
        confidence: f32,
        threshold: f32,
    ) -> bool;
}

/// Resting distance of an ejected card. Called once per throw.
pub trait ThrowOutDistance {
    fn throw_out_distance(&self, min: f32, max: f32) -> f32;
}

/// Rotation in degrees for a card at the given offset.
pub trait Rotation {
    fn rotation(&self, offset_x: f32, offset_y: f32, size: Size, max_rotation: f32) -> f32;
}

/// Paint a transform onto a card's surface.
pub trait Transform {
    fn transform(&self, surface: &mut dyn Surface, x: f32, y: f32, rotation: f32);
}

impl<F> ThrowOutConfidence for F
where
    F: Fn(f32, f32, Size) -> f32,
{
    fn throw_out_confidence(&self, offset_x: f32, offset_y: f32, size: Size) -> f32 {
        self(offset_x, offset_y, size)
    }
}

impl<F> IsThrowOut for F
where
    F: Fn(f32, f32, Size, f32, f32) -> bool,
{
    fn is_throw_out(
        &self,
        offset_x: f32,
        offset_y: f32,
        size: Size,
        confidence: f32,
        threshold: f32,
    ) -> bool {
        self(offset_x, offset_y, size, confidence, threshold)
    }
}

impl<F> ThrowOutDistance for F
where
    F: Fn(f32, f32) -> f32,
{
    fn throw_out_distance(&self, min: f32, max: f32) -> f32 {
        self(min, max)
    }
}

impl<F> Rotation for F
where
    F: Fn(f32, f32, Size, f32) -> f32,
{
    fn rotation(&self, offset_x: f32, offset_y: f32, size: Size, max_rotation: f32) -> f32 {
        self(offset_x, offset_y, size, max_rotation)
    }
}

impl<F> Transform for F
where
    F: Fn(&mut dyn Surface, f32, f32, f32),
{
    fn transform(&self, surface: &mut dyn Surface, x: f32, y: f32, rotation: f32) {
        self(surface, x, y, rotation)
    }
}

/// `|offset| / dimension` clamped to `[0, 1]`; 0 for a degenerate dimension.
fn axis_ratio(offset: f32, dimension: f32) -> f32 {
    if dimension > 0.0 && offset.is_finite() {
        (offset.abs() / dimension).min(1.0)
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProportionalConfidence;

impl ThrowOutConfidence for ProportionalConfidence {
    fn throw_out_confidence(&self, offset_x: f32, offset_y: f32, size: Size) -> f32 {
        axis_ratio(offset_x, size.width).max(axis_ratio(offset_y, size.height))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConfidenceThreshold;

impl IsThrowOut for ConfidenceThreshold {
    fn is_throw_out(&self, _: f32, _: f32, _: Size, confidence: f32, threshold: f32) -> bool {
        confidence >= threshold
    }
}

/// Uniform sample in `[min, max]`.
///
/// Uses the thread RNG unless [`seeded`](Self::seeded), which makes the
/// sequence of distances reproducible.
#[derive(Debug, Default)]
pub struct UniformDistance {
    rng: Option<RefCell<StdRng>>,
}

impl UniformDistance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(RefCell::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl ThrowOutDistance for UniformDistance {
    fn throw_out_distance(&self, min: f32, max: f32) -> f32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let span = high - low;
        if !span.is_finite() {
            // A non-finite or overflowing range has nothing to sample from
            return [min, max].into_iter().find(|v| v.is_finite()).unwrap_or(0.0);
        }
        if span <= f32::EPSILON {
            return low;
        }
        match &self.rng {
            Some(rng) => rng.borrow_mut().gen_range(low..=high),
            None => rand::thread_rng().gen_range(low..=high),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LinearRotation;

impl Rotation for LinearRotation {
    fn rotation(&self, offset_x: f32, _offset_y: f32, size: Size, max_rotation: f32) -> f32 {
        if size.width <= 0.0 || !offset_x.is_finite() {
            return 0.0;
        }
        (offset_x / size.width).clamp(-1.0, 1.0) * max_rotation
    }
}

/// Rotation that also depends on where the card is held vertically: dragging
/// right while moving down tilts clockwise, while moving up tilts
/// counter-clockwise. The vertical factor saturates after 100 units.
#[derive(Clone, Copy, Debug, Default)]
pub struct TiltRotation;

impl Rotation for TiltRotation {
    fn rotation(&self, offset_x: f32, offset_y: f32, size: Size, max_rotation: f32) -> f32 {
        if size.width <= 0.0 || !offset_x.is_finite() || !offset_y.is_finite() {
            return 0.0;
        }
        let horizontal = (offset_x / size.width).clamp(-1.0, 1.0);
        let sign = if offset_y > 0.0 { 1.0 } else { -1.0 };
        let vertical = sign * (offset_y.abs() / 100.0).min(1.0);
        horizontal * vertical * max_rotation
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceTransform;

impl Transform for SurfaceTransform {
    fn transform(&self, surface: &mut dyn Surface, x: f32, y: f32, rotation: f32) {
        surface.set_transform(CardTransform::new(x, y, rotation));
    }
}

/// Outcome of a release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThrowDecision {
    /// Settle back to the resting position.
    In,
    /// Eject along the direction.
    Out,
}

/// A fully evaluated throw: where the card animates from and to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Throw {
    pub decision: ThrowDecision,
    /// Direction reported with the throw events. `Invalid` when the dominant
    /// direction was not allowed or there was no dominant axis.
    pub direction: Direction,
    pub confidence: f32,
    pub from: CardTransform,
    pub to: CardTransform,
}

/// Confidence for `offset` using the configured strategy, clamped to `[0, 1]`.
pub fn confidence(config: &Config, offset: Offset, size: Size) -> f32 {
    let value = config
        .throw_out_confidence
        .throw_out_confidence(offset.x, offset.y, size);
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Rotation for `offset` using the configured strategy; 0 if the strategy
/// returns a non-finite value.
pub fn rotation(config: &Config, offset: Offset, size: Size) -> f32 {
    let value = config
        .rotation
        .rotation(offset.x, offset.y, size, config.max_rotation);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Decide what a release at `offset` does.
///
/// A dominant direction outside `allowed_directions` forces a throw-in
/// regardless of confidence; otherwise the [`IsThrowOut`] strategy decides.
pub fn evaluate_release(config: &Config, offset: Offset, size: Size) -> Throw {
    let confidence = confidence(config, offset, size);
    let classified = classify(offset.x, offset.y);
    let from = CardTransform::new(offset.x, offset.y, rotation(config, offset, size));

    if !config.allowed_directions.allows(classified) {
        return throw_in(from, Direction::Invalid, confidence);
    }

    let out = config.is_throw_out.is_throw_out(
        offset.x,
        offset.y,
        size,
        confidence,
        config.throw_out_confidence_threshold,
    );
    if out {
        throw_out(config, from, classified, confidence)
    } else {
        throw_in(from, classified, confidence)
    }
}

/// A throw back to the resting position.
pub fn throw_in(from: CardTransform, direction: Direction, confidence: f32) -> Throw {
    Throw {
        decision: ThrowDecision::In,
        direction,
        confidence,
        from,
        to: CardTransform::IDENTITY,
    }
}

/// A throw out along `direction`, keeping the release rotation and the offset
/// on the other axis. `direction` must not be `Invalid`.
pub fn throw_out(
    config: &Config,
    from: CardTransform,
    direction: Direction,
    confidence: f32,
) -> Throw {
    let sampled = config
        .throw_out_distance
        .throw_out_distance(config.min_throw_out_distance, config.max_throw_out_distance);
    let distance = if sampled.is_finite() {
        sampled.abs()
    } else {
        log::warn!(
            "throw-out distance {} is not finite, using {}",
            sampled,
            config.max_throw_out_distance
        );
        config.max_throw_out_distance.abs()
    };
    let displacement = distance * direction.sign();

    let to = if direction.is_horizontal() {
        CardTransform::new(displacement, from.y, from.rotation)
    } else {
        CardTransform::new(from.x, displacement, from.rotation)
    };

    Throw {
        decision: ThrowDecision::Out,
        direction,
        confidence,
        from,
        to,
    }
}
