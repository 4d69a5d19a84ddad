mod animatable;
mod spring;
mod system;
mod transform;

pub use animatable::Animatable;
pub use spring::{Spring, SpringConfig, REST_DISPLACEMENT, REST_VELOCITY};
pub use system::{SpringId, SpringSystem, SpringUpdate};
pub use transform::CardTransform;
