pub mod animation;
pub mod card;
pub mod config;
pub mod direction;
pub mod events;
pub mod geometry;
pub mod input;
pub mod stack;
pub mod surface;
pub mod throw;

mod arena;
mod error;

pub use card::{Card, CardId, CardState};
pub use config::{CardConfig, Config};
pub use direction::{Direction, Directions};
pub use error::{Error, Result};
pub use events::{CardEvent, CardTarget, EventKind, ListenerId};
pub use stack::Stack;
pub use surface::{ElementId, Surface};

pub mod prelude {
    pub use crate::animation::{CardTransform, SpringConfig};
    pub use crate::direction::{classify, Direction, Directions};
    pub use crate::events::{CardEvent, CardTarget, EventKind, ListenerId};
    pub use crate::geometry::{Offset, Rect, Size};
    pub use crate::input::{EventResponse, MouseButton, PointerEvent};
    pub use crate::surface::{ElementId, Surface};
    pub use crate::throw::{
        ConfidenceThreshold, IsThrowOut, LinearRotation, ProportionalConfidence, Rotation,
        SurfaceTransform, ThrowOutConfidence, ThrowOutDistance, TiltRotation, Transform,
        UniformDistance,
    };
    pub use crate::{CardConfig, CardId, CardState, Config, Stack};
}
