//! Per-card gesture state machine.
//!
//! ```text
//!            drag start                release: throw-in
//!   Idle ─────────────────▶ Dragging ───────────────────▶ SettlingIn ──▶ Idle
//!    ▲                         │  ▲                            │   (spring at rest)
//!    │                         │  │ drag start (cancels spring)│
//!    │                         │  └────────────────────────────┤
//!    │                         │ release: throw-out            │
//!    │                         ▼                               │
//!    │                      Ejecting ──▶ Destroyed (spring at rest, evicted)
//!    │
//!    └── any state ──destroy──▶ Destroyed (idempotent)
//! ```
//!
//! # Invariants
//!
//! 1. At most one drag is active per card. A second drag start while
//!    dragging is ignored.
//! 2. A card never animates and drags at the same time: entering `Dragging`
//!    stops the attached spring before anything else happens.
//! 3. Every offset change, from a move or from a spring tick, goes through the
//!    configured transform strategy, so the surface always shows the logical
//!    offset.
//! 4. Once `Destroyed`, every operation is a no-op.

use crate::animation::{Animatable, CardTransform, SpringId, SpringSystem};
use crate::arena::Key;
use crate::config::Config;
use crate::direction::{classify, classify_allowed, Direction};
use crate::events::{CardEvent, CardTarget, EventEmitter};
use crate::geometry::{Offset, Size};
use crate::input::{EventResponse, MouseButton, PointerEvent};
use crate::surface::{ElementId, Surface};
use crate::throw::{self, Throw, ThrowDecision};

/// Handle to a card in a [`Stack`](crate::Stack).
///
/// Generational: the handle of a destroyed card never resolves again, even if
/// its slot is reused by a new card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CardId(pub(crate) Key);

#[cfg(test)]
impl CardId {
    pub(crate) fn for_tests(index: u32) -> Self {
        CardId(Key::new(index, 0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Idle,
    Dragging,
    SettlingIn,
    Ejecting,
    Destroyed,
}

/// What a spring tick did to the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpringOutcome {
    /// The update was stale or the card is still animating.
    Continue,
    /// Throw-in finished; the card is back at rest.
    Settled,
    /// Throw-out finished; the card should be evicted from the stack.
    Ejected,
}

/// Shared stack resources a card needs while handling input or a tick.
pub(crate) struct CardContext<'a> {
    pub springs: &'a mut SpringSystem,
    pub emitter: &'a mut EventEmitter,
}

/// Snapshot taken when a drag starts.
#[derive(Clone, Copy, Debug)]
struct DragOrigin {
    /// Card offset when the drag started (non-zero if grabbed mid-animation)
    offset: Offset,
    /// Pointer position at press and most recent pointer position, when the
    /// drag is driven by pointer events
    pointer: Option<(Offset, Offset)>,
}

pub struct Card {
    id: CardId,
    surface: Box<dyn Surface>,
    config: Config,
    spring: SpringId,
    state: CardState,
    /// What the surface currently shows
    transform: CardTransform,
    drag: Option<DragOrigin>,
    /// The throw the spring is animating, while settling or ejecting
    throw: Option<Throw>,
}

impl Card {
    pub(crate) fn new(
        id: CardId,
        mut surface: Box<dyn Surface>,
        config: Config,
        spring: SpringId,
        prepend: bool,
    ) -> Self {
        if prepend {
            surface.prepend_to_parent();
        } else {
            surface.append_to_parent();
        }
        Self {
            id,
            surface,
            config,
            spring,
            state: CardState::Idle,
            transform: CardTransform::IDENTITY,
            drag: None,
            throw: None,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.surface.element_id()
    }

    pub fn target(&self) -> CardTarget {
        CardTarget {
            card: self.id,
            element: self.element(),
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &dyn Surface {
        &*self.surface
    }

    pub(crate) fn spring(&self) -> SpringId {
        self.spring
    }

    /// Current offset from the resting position.
    pub fn offset(&self) -> Offset {
        self.transform.offset()
    }

    /// Current offset and rotation, as last painted.
    pub fn transform(&self) -> CardTransform {
        self.transform
    }

    /// Where the spring is taking the card, while it animates.
    pub fn spring_target(&self) -> Option<CardTransform> {
        self.throw.map(|t| t.to)
    }

    /// Offset the card had when the current drag started.
    pub fn drag_start_position(&self) -> Option<Offset> {
        self.drag.map(|d| d.offset)
    }

    pub fn is_dragging(&self) -> bool {
        self.state == CardState::Dragging
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, CardState::SettlingIn | CardState::Ejecting)
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == CardState::Destroyed
    }

    fn size(&self) -> Size {
        self.surface.bounds().size()
    }

    fn paint(&mut self, transform: CardTransform) {
        self.transform = transform;
        self.config
            .transform
            .transform(&mut *self.surface, transform.x, transform.y, transform.rotation);
    }

    fn set_state(&mut self, state: CardState) {
        if self.state != state {
            log::debug!("card {:?}: {:?} -> {:?}", self.id, self.state, state);
            self.state = state;
        }
    }

    /// Begin a drag. Returns false if the card is destroyed or already being
    /// dragged.
    pub(crate) fn drag_start(&mut self, ctx: &mut CardContext<'_>) -> bool {
        match self.state {
            CardState::Destroyed | CardState::Dragging => return false,
            CardState::Idle | CardState::SettlingIn | CardState::Ejecting => {}
        }

        // Cancel first so no tick can move the card once the drag owns it
        ctx.springs.stop(self.spring);
        self.throw = None;

        self.drag = Some(DragOrigin {
            offset: self.offset(),
            pointer: None,
        });
        self.surface.append_to_parent();
        self.set_state(CardState::Dragging);
        ctx.emitter.emit(CardEvent::DragStart {
            target: self.target(),
        });
        true
    }

    /// Move the card to `delta` away from where the drag started.
    pub(crate) fn drag_move(&mut self, ctx: &mut CardContext<'_>, delta: Offset) -> bool {
        let Some(origin) = self.drag.filter(|_| self.state == CardState::Dragging) else {
            return false;
        };

        let offset = origin.offset + delta;
        let size = self.size();
        let rotation = throw::rotation(&self.config, offset, size);
        self.paint(CardTransform::new(offset.x, offset.y, rotation));

        let throw_out_confidence = throw::confidence(&self.config, offset, size);
        let throw_direction = classify_allowed(offset.x, offset.y, self.config.allowed_directions);
        ctx.emitter.emit(CardEvent::DragMove {
            target: self.target(),
            offset,
            throw_direction,
            throw_out_confidence,
        });
        true
    }

    /// Release the card and throw it in or out from its current offset.
    pub(crate) fn drag_end(&mut self, ctx: &mut CardContext<'_>) -> bool {
        if self.state != CardState::Dragging {
            return false;
        }
        self.drag = None;

        let throw = throw::evaluate_release(&self.config, self.offset(), self.size());
        log::debug!(
            "card {:?}: released at ({}, {}), direction {}, confidence {:.3}, {:?}",
            self.id,
            throw.from.x,
            throw.from.y,
            throw.direction,
            throw.confidence,
            throw.decision
        );

        ctx.emitter.emit(CardEvent::DragEnd {
            target: self.target(),
        });
        self.begin_throw(ctx, throw);
        true
    }

    /// Route raw pointer input into the drag operations.
    pub(crate) fn handle_event(
        &mut self,
        ctx: &mut CardContext<'_>,
        event: &PointerEvent,
    ) -> EventResponse {
        let (x, y) = event.coords();
        let position = Offset::new(x, y);

        match *event {
            PointerEvent::Down { button, .. } => {
                if button != MouseButton::Left || !self.drag_start(ctx) {
                    return EventResponse::Ignored;
                }
                if let Some(ref mut drag) = self.drag {
                    drag.pointer = Some((position, position));
                }
                EventResponse::Handled
            }
            PointerEvent::Move { .. } => {
                let Some((press, _)) = self.pointer_drag() else {
                    return EventResponse::Ignored;
                };
                self.record_pointer(position);
                self.drag_move(ctx, position - press);
                EventResponse::Handled
            }
            PointerEvent::Up { button, .. } => {
                if button != MouseButton::Left {
                    return EventResponse::Ignored;
                }
                let Some((press, last)) = self.pointer_drag() else {
                    return EventResponse::Ignored;
                };
                // Deliver the release position as a final move first
                if position != last {
                    self.record_pointer(position);
                    self.drag_move(ctx, position - press);
                }
                self.drag_end(ctx);
                EventResponse::Handled
            }
        }
    }

    fn pointer_drag(&self) -> Option<(Offset, Offset)> {
        if self.state != CardState::Dragging {
            return None;
        }
        self.drag.and_then(|d| d.pointer)
    }

    fn record_pointer(&mut self, position: Offset) {
        if let Some(DragOrigin {
            pointer: Some((_, ref mut last)),
            ..
        }) = self.drag
        {
            *last = position;
        }
    }

    /// Animate back to the resting position from `from`, as if released
    /// there.
    pub(crate) fn throw_in(
        &mut self,
        ctx: &mut CardContext<'_>,
        from: Offset,
        direction: Direction,
    ) -> bool {
        if self.is_destroyed() {
            return false;
        }
        ctx.springs.stop(self.spring);
        self.drag = None;

        let size = self.size();
        let start = CardTransform::new(from.x, from.y, throw::rotation(&self.config, from, size));
        let confidence = throw::confidence(&self.config, from, size);
        self.begin_throw(ctx, throw::throw_in(start, direction, confidence));
        true
    }

    /// Eject the card from `from`. Without a usable direction the direction
    /// is classified from `from`; if that has no dominant axis either, the
    /// card is thrown in instead.
    pub(crate) fn throw_out(
        &mut self,
        ctx: &mut CardContext<'_>,
        from: Offset,
        direction: Option<Direction>,
    ) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let direction = match direction {
            Some(d) if d != Direction::Invalid => d,
            _ => classify(from.x, from.y),
        };
        if direction == Direction::Invalid {
            log::warn!(
                "card {:?}: no throw-out direction for ({}, {}), throwing in",
                self.id,
                from.x,
                from.y
            );
            return self.throw_in(ctx, from, Direction::Invalid);
        }

        ctx.springs.stop(self.spring);
        self.drag = None;

        let size = self.size();
        let start = CardTransform::new(from.x, from.y, throw::rotation(&self.config, from, size));
        let confidence = throw::confidence(&self.config, from, size);
        let throw = throw::throw_out(&self.config, start, direction, confidence);
        self.begin_throw(ctx, throw);
        true
    }

    fn begin_throw(&mut self, ctx: &mut CardContext<'_>, throw: Throw) {
        self.paint(throw.from);
        self.throw = Some(throw);

        let target = self.target();
        match throw.decision {
            ThrowDecision::In => {
                ctx.springs.start(self.spring, self.config.throw_in_spring);
                self.set_state(CardState::SettlingIn);
                ctx.emitter.emit(CardEvent::ThrowIn {
                    target,
                    throw_direction: throw.direction,
                });
            }
            ThrowDecision::Out => {
                ctx.springs.start(self.spring, self.config.throw_out_spring);
                self.set_state(CardState::Ejecting);
                ctx.emitter.emit(CardEvent::ThrowOut {
                    target,
                    throw_direction: throw.direction,
                });
                ctx.emitter.emit(CardEvent::ThrowOutDirected {
                    target,
                    throw_direction: throw.direction,
                });
            }
        }
    }

    /// Apply spring progress to the card.
    pub(crate) fn on_spring_update(
        &mut self,
        ctx: &mut CardContext<'_>,
        position: f32,
        at_rest: bool,
    ) -> SpringOutcome {
        if !self.is_animating() {
            return SpringOutcome::Continue;
        }
        let Some(throw) = self.throw else {
            return SpringOutcome::Continue;
        };

        if !at_rest {
            self.paint(CardTransform::lerp(&throw.from, &throw.to, position));
            return SpringOutcome::Continue;
        }

        // Land exactly on the target
        self.paint(throw.to);
        self.throw = None;
        match self.state {
            CardState::SettlingIn => {
                self.set_state(CardState::Idle);
                SpringOutcome::Settled
            }
            _ => {
                ctx.emitter.emit(CardEvent::ThrowOutEnd {
                    target: self.target(),
                });
                SpringOutcome::Ejected
            }
        }
    }

    /// Destroy the card: cancel its animation, detach its spring and drop its
    /// listeners. Returns false if it was already destroyed.
    pub(crate) fn destroy(&mut self, ctx: &mut CardContext<'_>) -> bool {
        if self.is_destroyed() {
            return false;
        }
        ctx.springs.stop(self.spring);
        ctx.springs.remove(self.spring);
        self.drag = None;
        self.throw = None;
        self.set_state(CardState::Destroyed);

        ctx.emitter.emit(CardEvent::DestroyCard {
            target: self.target(),
        });
        let removed = ctx.emitter.remove_card_listeners(self.id);
        if removed > 0 {
            log::debug!("card {:?}: dropped {} listener(s)", self.id, removed);
        }
        true
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("element", &self.element())
            .field("state", &self.state)
            .field("transform", &self.transform)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SpringSystem;
    use crate::events::EventKind;
    use crate::geometry::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_micros(16_667);

    struct TestSurface {
        transforms: Rc<RefCell<Vec<CardTransform>>>,
        size: Size,
    }

    impl Surface for TestSurface {
        fn element_id(&self) -> ElementId {
            ElementId(7)
        }

        fn bounds(&self) -> Rect {
            Rect::from_size(self.size)
        }

        fn set_transform(&mut self, transform: CardTransform) {
            self.transforms.borrow_mut().push(transform);
        }
    }

    struct Harness {
        card: Card,
        springs: SpringSystem,
        emitter: EventEmitter,
        transforms: Rc<RefCell<Vec<CardTransform>>>,
        events: Rc<RefCell<Vec<EventKind>>>,
    }

    impl Harness {
        fn new(config: Config, size: Size) -> Self {
            let transforms = Rc::new(RefCell::new(Vec::new()));
            let mut springs = SpringSystem::new();
            let spring = springs.create(config.throw_in_spring);
            let surface = TestSurface {
                transforms: Rc::clone(&transforms),
                size,
            };
            let card = Card::new(CardId::for_tests(0), Box::new(surface), config, spring, false);

            let mut emitter = EventEmitter::new();
            let events = Rc::new(RefCell::new(Vec::new()));
            for kind in EventKind::ALL {
                let events = Rc::clone(&events);
                emitter.on(kind, move |e| events.borrow_mut().push(e.kind()));
            }

            Self {
                card,
                springs,
                emitter,
                transforms,
                events,
            }
        }

        fn with<R>(&mut self, f: impl FnOnce(&mut Card, &mut CardContext<'_>) -> R) -> R {
            let mut ctx = CardContext {
                springs: &mut self.springs,
                emitter: &mut self.emitter,
            };
            f(&mut self.card, &mut ctx)
        }

        fn tick(&mut self) -> SpringOutcome {
            let mut outcome = SpringOutcome::Continue;
            for update in self.springs.tick(FRAME) {
                assert_eq!(update.id, self.card.spring());
                let mut ctx = CardContext {
                    springs: &mut self.springs,
                    emitter: &mut self.emitter,
                };
                outcome = self
                    .card
                    .on_spring_update(&mut ctx, update.position, update.at_rest);
            }
            outcome
        }

        fn run_until_done(&mut self) -> SpringOutcome {
            for _ in 0..600 {
                let outcome = self.tick();
                if outcome != SpringOutcome::Continue {
                    return outcome;
                }
            }
            SpringOutcome::Continue
        }

        fn events(&self) -> Vec<EventKind> {
            self.events.borrow().clone()
        }
    }

    fn harness() -> Harness {
        Harness::new(Config::default(), Size::new(100.0, 100.0))
    }

    #[test]
    fn test_drag_start_is_exclusive() {
        let mut h = harness();
        assert!(h.with(|c, ctx| c.drag_start(ctx)));
        assert!(!h.with(|c, ctx| c.drag_start(ctx)));
        assert_eq!(h.events(), vec![EventKind::DragStart]);
        assert_eq!(h.card.drag_start_position(), Some(Offset::ZERO));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut h = harness();
        assert!(!h.with(|c, ctx| c.drag_move(ctx, Offset::new(10.0, 0.0))));
        assert!(!h.with(|c, ctx| c.drag_end(ctx)));
        assert!(h.events().is_empty());
        assert!(h.transforms.borrow().is_empty());
    }

    #[test]
    fn test_drag_move_paints_and_reports() {
        let mut h = harness();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        h.emitter.on(EventKind::DragMove, move |e| {
            *s.borrow_mut() = Some((e.offset(), e.throw_direction(), e.throw_out_confidence()));
        });

        h.with(|c, ctx| c.drag_start(ctx));
        h.with(|c, ctx| c.drag_move(ctx, Offset::new(-40.0, 5.0)));

        let last = *h.transforms.borrow().last().unwrap();
        assert_eq!(last.x, -40.0);
        assert_eq!(last.y, 5.0);
        assert!((last.rotation + 8.0).abs() < 1e-5);

        let (offset, direction, confidence) = seen.borrow().unwrap();
        assert_eq!(offset, Some(Offset::new(-40.0, 5.0)));
        assert_eq!(direction, Some(Direction::Left));
        assert!((confidence.unwrap() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_throw_in_settles_to_identity() {
        let mut h = harness();
        h.with(|c, ctx| c.drag_start(ctx));
        h.with(|c, ctx| c.drag_move(ctx, Offset::new(30.0, 10.0)));
        h.with(|c, ctx| c.drag_end(ctx));

        assert_eq!(h.card.state(), CardState::SettlingIn);
        assert_eq!(h.card.drag_start_position(), None);
        assert_eq!(h.card.spring_target(), Some(CardTransform::IDENTITY));

        assert_eq!(h.run_until_done(), SpringOutcome::Settled);
        assert_eq!(h.card.state(), CardState::Idle);
        assert_eq!(h.card.transform(), CardTransform::IDENTITY);
        assert_eq!(*h.transforms.borrow().last().unwrap(), CardTransform::IDENTITY);
        assert_eq!(
            h.events(),
            vec![
                EventKind::DragStart,
                EventKind::DragMove,
                EventKind::DragEnd,
                EventKind::ThrowIn
            ]
        );
    }

    #[test]
    fn test_throw_out_ends_with_event() {
        let mut h = harness();
        h.with(|c, ctx| c.drag_start(ctx));
        h.with(|c, ctx| c.drag_move(ctx, Offset::new(0.0, -70.0)));
        h.with(|c, ctx| c.drag_end(ctx));
        assert_eq!(h.card.state(), CardState::Ejecting);

        let target = h.card.spring_target().unwrap();
        assert!(target.y <= -400.0 && target.y >= -500.0);

        assert_eq!(h.run_until_done(), SpringOutcome::Ejected);
        assert_eq!(h.card.transform(), target);
        assert_eq!(
            h.events(),
            vec![
                EventKind::DragStart,
                EventKind::DragMove,
                EventKind::DragEnd,
                EventKind::ThrowOut,
                EventKind::ThrowOutUp,
                EventKind::ThrowOutEnd
            ]
        );
    }

    #[test]
    fn test_grab_mid_animation_cancels_spring() {
        let mut h = harness();
        h.with(|c, ctx| c.drag_start(ctx));
        h.with(|c, ctx| c.drag_move(ctx, Offset::new(30.0, 0.0)));
        h.with(|c, ctx| c.drag_end(ctx));
        for _ in 0..3 {
            h.tick();
        }
        let grabbed_at = h.card.offset();
        assert!(grabbed_at.x > 0.0 && grabbed_at.x < 30.0);

        h.with(|c, ctx| c.drag_start(ctx));
        assert_eq!(h.card.drag_start_position(), Some(grabbed_at));
        assert_eq!(h.card.spring_target(), None);

        let painted = h.transforms.borrow().len();
        h.tick();
        assert_eq!(h.transforms.borrow().len(), painted);

        // The new drag continues from where the card was caught
        h.with(|c, ctx| c.drag_move(ctx, Offset::new(5.0, 0.0)));
        assert_eq!(h.card.offset().x, grabbed_at.x + 5.0);
    }

    #[test]
    fn test_pointer_events_drive_drag() {
        let mut h = harness();
        let down = PointerEvent::Down {
            x: 200.0,
            y: 300.0,
            button: MouseButton::Left,
        };
        assert!(h.with(|c, ctx| c.handle_event(ctx, &down)).is_handled());
        h.with(|c, ctx| c.handle_event(ctx, &PointerEvent::Move { x: 250.0, y: 305.0 }));
        assert_eq!(h.card.offset(), Offset::new(50.0, 5.0));

        let up = PointerEvent::Up {
            x: 290.0,
            y: 305.0,
            button: MouseButton::Left,
        };
        h.with(|c, ctx| c.handle_event(ctx, &up));
        assert_eq!(h.card.state(), CardState::Ejecting);
        assert_eq!(
            h.events(),
            vec![
                EventKind::DragStart,
                EventKind::DragMove,
                EventKind::DragMove,
                EventKind::DragEnd,
                EventKind::ThrowOut,
                EventKind::ThrowOutRight
            ]
        );
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut h = harness();
        let down = PointerEvent::Down {
            x: 0.0,
            y: 0.0,
            button: MouseButton::Right,
        };
        assert_eq!(h.with(|c, ctx| c.handle_event(ctx, &down)), EventResponse::Ignored);
        assert_eq!(h.card.state(), CardState::Idle);
    }

    #[test]
    fn test_programmatic_throw_out_classifies_direction() {
        let mut h = harness();
        assert!(h.with(|c, ctx| c.throw_out(ctx, Offset::new(-10.0, 2.0), None)));
        assert_eq!(h.card.state(), CardState::Ejecting);
        assert_eq!(
            h.events(),
            vec![EventKind::ThrowOut, EventKind::ThrowOutLeft]
        );
    }

    #[test]
    fn test_programmatic_throw_out_without_direction_throws_in() {
        let mut h = harness();
        h.with(|c, ctx| c.throw_out(ctx, Offset::ZERO, Some(Direction::Invalid)));
        assert_eq!(h.card.state(), CardState::SettlingIn);
        assert_eq!(h.events(), vec![EventKind::ThrowIn]);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut h = harness();
        h.with(|c, ctx| c.drag_start(ctx));
        assert!(h.with(|c, ctx| c.destroy(ctx)));
        assert!(!h.with(|c, ctx| c.destroy(ctx)));
        assert!(!h.springs.contains(h.card.spring()));

        // Destroyed cards ignore everything
        assert!(!h.with(|c, ctx| c.drag_start(ctx)));
        assert!(!h.with(|c, ctx| c.throw_in(ctx, Offset::ZERO, Direction::Invalid)));

        let destroys = h
            .events()
            .into_iter()
            .filter(|k| *k == EventKind::DestroyCard)
            .count();
        assert_eq!(destroys, 1);
    }

    #[test]
    fn test_zero_size_surface() {
        let mut h = Harness::new(Config::default(), Size::zero());
        h.with(|c, ctx| c.drag_start(ctx));
        h.with(|c, ctx| c.drag_move(ctx, Offset::new(80.0, 0.0)));
        let last = *h.transforms.borrow().last().unwrap();
        assert_eq!(last.rotation, 0.0);

        h.with(|c, ctx| c.drag_end(ctx));
        assert_eq!(h.card.state(), CardState::SettlingIn);
    }
}
