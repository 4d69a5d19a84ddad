use super::Animatable;
use crate::geometry::Offset;

/// Visual state of a card: translation from its resting position plus a
/// rotation in degrees (clockwise).
///
/// Applied by the host at paint time; never affects layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl CardTransform {
    /// Resting position: no translation, no rotation
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
    };

    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }

    pub fn offset(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// CSS `transform` value equivalent to this transform.
    ///
    /// The leading `translate3d(0, 0, 0)` promotes the element to its own
    /// compositing layer in browsers.
    pub fn to_css(&self) -> String {
        format!(
            "translate3d(0, 0, 0) translate({}px, {}px) rotate({}deg)",
            self.x, self.y, self.rotation
        )
    }
}

impl Animatable for CardTransform {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let offset = Offset::lerp(&from.offset(), &to.offset(), t);
        Self {
            x: offset.x,
            y: offset.y,
            rotation: f32::lerp(&from.rotation, &to.rotation, t),
        }
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
