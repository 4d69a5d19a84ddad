//! The host side of a card: its visual element.
//!
//! The engine never owns rendering resources. Each card holds a boxed
//! [`Surface`] that reports geometry and receives transforms; how those are
//! drawn (CSS, a GPU quad, a terminal cell grid) is entirely up to the host.

use crate::animation::CardTransform;
use crate::geometry::Rect;

/// Stable identity of a host element, used to look cards up by element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementId(pub u64);

pub trait Surface {
    /// Identity of the element this surface draws.
    fn element_id(&self) -> ElementId;

    /// Untransformed bounds of the element.
    fn bounds(&self) -> Rect;

    /// Apply a translation and rotation (degrees) relative to the resting
    /// position.
    fn set_transform(&mut self, transform: CardTransform);

    /// Move the element last among its siblings so it renders on top.
    fn append_to_parent(&mut self) {}

    /// Move the element first among its siblings so it renders at the bottom.
    fn prepend_to_parent(&mut self) {}
}
