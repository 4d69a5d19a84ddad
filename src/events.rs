//! Lifecycle notifications and the publish/subscribe dispatcher.
//!
//! Listeners subscribe to an [`EventKind`] and are invoked synchronously, in
//! subscription order, while the stack processes input or a tick. A listener
//! only receives the event by shared reference and cannot reach the stack, so
//! dispatch can never re-enter the gesture state machine.
//!
//! Listeners registered for a specific card are dropped when that card is
//! destroyed.

use std::fmt;
use std::str::FromStr;

use crate::card::CardId;
use crate::direction::Direction;
use crate::error::Error;
use crate::geometry::Offset;
use crate::surface::ElementId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    DragStart,
    DragMove,
    DragEnd,
    ThrowIn,
    ThrowOut,
    ThrowOutLeft,
    ThrowOutRight,
    ThrowOutUp,
    ThrowOutDown,
    ThrowOutEnd,
    DestroyCard,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::DragStart,
        EventKind::DragMove,
        EventKind::DragEnd,
        EventKind::ThrowIn,
        EventKind::ThrowOut,
        EventKind::ThrowOutLeft,
        EventKind::ThrowOutRight,
        EventKind::ThrowOutUp,
        EventKind::ThrowOutDown,
        EventKind::ThrowOutEnd,
        EventKind::DestroyCard,
    ];

    /// The direction-specific throw-out kind, if `direction` has one.
    pub fn throw_out(direction: Direction) -> Option<EventKind> {
        match direction {
            Direction::Left => Some(EventKind::ThrowOutLeft),
            Direction::Right => Some(EventKind::ThrowOutRight),
            Direction::Up => Some(EventKind::ThrowOutUp),
            Direction::Down => Some(EventKind::ThrowOutDown),
            Direction::Invalid => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::DragStart => "dragstart",
            EventKind::DragMove => "dragmove",
            EventKind::DragEnd => "dragend",
            EventKind::ThrowIn => "throwin",
            EventKind::ThrowOut => "throwout",
            EventKind::ThrowOutLeft => "throwoutleft",
            EventKind::ThrowOutRight => "throwoutright",
            EventKind::ThrowOutUp => "throwoutup",
            EventKind::ThrowOutDown => "throwoutdown",
            EventKind::ThrowOutEnd => "throwoutend",
            EventKind::DestroyCard => "destroyCard",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}

/// The card an event is about, and the host element it draws to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardTarget {
    pub card: CardId,
    pub element: ElementId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardEvent {
    DragStart {
        target: CardTarget,
    },
    DragMove {
        target: CardTarget,
        offset: Offset,
        /// Dominant direction, `Invalid` when it is not allowed.
        throw_direction: Direction,
        throw_out_confidence: f32,
    },
    DragEnd {
        target: CardTarget,
    },
    ThrowIn {
        target: CardTarget,
        throw_direction: Direction,
    },
    ThrowOut {
        target: CardTarget,
        throw_direction: Direction,
    },
    /// Emitted right after [`CardEvent::ThrowOut`], under the kind matching
    /// its direction (`throwoutleft`, `throwoutright`, ...).
    ThrowOutDirected {
        target: CardTarget,
        throw_direction: Direction,
    },
    ThrowOutEnd {
        target: CardTarget,
    },
    DestroyCard {
        target: CardTarget,
    },
}

impl CardEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CardEvent::DragStart { .. } => EventKind::DragStart,
            CardEvent::DragMove { .. } => EventKind::DragMove,
            CardEvent::DragEnd { .. } => EventKind::DragEnd,
            CardEvent::ThrowIn { .. } => EventKind::ThrowIn,
            CardEvent::ThrowOut { .. } => EventKind::ThrowOut,
            CardEvent::ThrowOutDirected {
                throw_direction, ..
            } => EventKind::throw_out(*throw_direction).unwrap_or(EventKind::ThrowOut),
            CardEvent::ThrowOutEnd { .. } => EventKind::ThrowOutEnd,
            CardEvent::DestroyCard { .. } => EventKind::DestroyCard,
        }
    }

    pub fn target(&self) -> CardTarget {
        match self {
            CardEvent::DragStart { target }
            | CardEvent::DragMove { target, .. }
            | CardEvent::DragEnd { target }
            | CardEvent::ThrowIn { target, .. }
            | CardEvent::ThrowOut { target, .. }
            | CardEvent::ThrowOutDirected { target, .. }
            | CardEvent::ThrowOutEnd { target }
            | CardEvent::DestroyCard { target } => *target,
        }
    }

    pub fn throw_direction(&self) -> Option<Direction> {
        match self {
            CardEvent::DragMove {
                throw_direction, ..
            }
            | CardEvent::ThrowIn {
                throw_direction, ..
            }
            | CardEvent::ThrowOut {
                throw_direction, ..
            }
            | CardEvent::ThrowOutDirected {
                throw_direction, ..
            } => Some(*throw_direction),
            _ => None,
        }
    }

    pub fn offset(&self) -> Option<Offset> {
        match self {
            CardEvent::DragMove { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn throw_out_confidence(&self) -> Option<f32> {
        match self {
            CardEvent::DragMove {
                throw_out_confidence,
                ..
            } => Some(*throw_out_confidence),
            _ => None,
        }
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&CardEvent)>;

struct Subscription {
    id: ListenerId,
    kind: EventKind,
    /// Only events targeting this card are delivered, when set.
    card: Option<CardId>,
    listener: Listener,
}

#[derive(Default)]
pub struct EventEmitter {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event of `kind`.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&CardEvent) + 'static) -> ListenerId {
        self.subscribe(kind, None, Box::new(listener))
    }

    /// Subscribe to events of `kind` targeting `card` only. Removed when the
    /// card is destroyed.
    pub fn on_card(
        &mut self,
        card: CardId,
        kind: EventKind,
        listener: impl FnMut(&CardEvent) + 'static,
    ) -> ListenerId {
        self.subscribe(kind, Some(card), Box::new(listener))
    }

    fn subscribe(&mut self, kind: EventKind, card: Option<CardId>, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            card,
            listener,
        });
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Remove every listener scoped to `card`.
    pub fn remove_card_listeners(&mut self, card: CardId) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.card != Some(card));
        before - self.subscriptions.len()
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Deliver `event` to its subscribers in subscription order.
    pub fn emit(&mut self, event: CardEvent) {
        let kind = event.kind();
        let card = event.target().card;
        log::trace!("emit {} for {:?}", kind, card);
        for subscription in &mut self.subscriptions {
            if subscription.kind != kind {
                continue;
            }
            if subscription.card.is_some_and(|c| c != card) {
                continue;
            }
            (subscription.listener)(&event);
        }
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}
