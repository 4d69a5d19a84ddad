/// Pointer input routed to a card, in the host's coordinate space.
///
/// Only the differences between positions matter; the origin can be anything
/// as long as it is consistent for the whole gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed over the card
    Down { x: f32, y: f32, button: MouseButton },
    /// Pointer moved; ignored unless a drag is in progress
    Move { x: f32, y: f32 },
    /// Button released
    Up { x: f32, y: f32, button: MouseButton },
}

impl PointerEvent {
    pub fn coords(&self) -> (f32, f32) {
        match self {
            PointerEvent::Down { x, y, .. }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y, .. } => (*x, *y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

impl EventResponse {
    pub fn is_handled(self) -> bool {
        self == EventResponse::Handled
    }
}
