//! The card registry and the driver for input and animation.
//!
//! A [`Stack`] exclusively owns its cards, the [`SpringSystem`] their
//! animations run on, and the [`EventEmitter`] listeners subscribe through.
//! The host forwards pointer input (or calls the drag operations directly)
//! and calls [`Stack::tick`] once per animation frame; everything else
//! happens synchronously inside those calls.

use std::collections::HashMap;
use std::time::Duration;

use crate::animation::{SpringId, SpringSystem};
use crate::arena::Arena;
use crate::card::{Card, CardContext, CardId, SpringOutcome};
use crate::config::{CardConfig, Config};
use crate::direction::Direction;
use crate::events::{CardEvent, EventEmitter, EventKind, ListenerId};
use crate::geometry::Offset;
use crate::input::{EventResponse, PointerEvent};
use crate::surface::{ElementId, Surface};

pub struct Stack {
    config: Config,
    cards: Arena<Card>,
    springs: SpringSystem,
    emitter: EventEmitter,
    by_element: HashMap<ElementId, CardId>,
    by_spring: HashMap<SpringId, CardId>,
    /// Bottom to top, mirroring the sibling order of the surfaces
    order: Vec<CardId>,
}

impl Stack {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.normalized(),
            cards: Arena::default(),
            springs: SpringSystem::new(),
            emitter: EventEmitter::new(),
            by_element: HashMap::new(),
            by_spring: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Defaults every new card starts from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn spring_system(&self) -> &SpringSystem {
        &self.springs
    }

    /// Subscribe to every event of `kind`, for all cards.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&CardEvent) + 'static) -> ListenerId {
        self.emitter.on(kind, listener)
    }

    /// Subscribe to events of `kind` for one card. The listener is dropped
    /// when the card is destroyed. Returns `None` if the card does not exist.
    pub fn on_card(
        &mut self,
        card: CardId,
        kind: EventKind,
        listener: impl FnMut(&CardEvent) + 'static,
    ) -> Option<ListenerId> {
        if !self.cards.contains(card.0) {
            return None;
        }
        Some(self.emitter.on_card(card, kind, listener))
    }

    pub fn off(&mut self, listener: ListenerId) -> bool {
        self.emitter.off(listener)
    }

    /// Register `surface` as a card with the stack defaults.
    ///
    /// The surface is moved on top of its siblings, or to the bottom when
    /// `prepend` is set.
    pub fn create_card(&mut self, surface: Box<dyn Surface>, prepend: bool) -> CardId {
        self.create_card_with_config(surface, CardConfig::default(), prepend)
    }

    /// Register `surface` with per-card overrides. An element that already
    /// has a card keeps it; the existing card is returned.
    pub fn create_card_with_config(
        &mut self,
        surface: Box<dyn Surface>,
        overrides: CardConfig,
        prepend: bool,
    ) -> CardId {
        let element = surface.element_id();
        if let Some(&existing) = self.by_element.get(&element) {
            log::debug!("element {:?} already has card {:?}", element, existing);
            return existing;
        }

        let config = self.config.merge(&overrides);
        let spring = self.springs.create(config.throw_in_spring);
        let id = CardId(self.cards.next_key());
        let card = Card::new(id, surface, config, spring, prepend);
        let key = self.cards.insert(card);
        debug_assert_eq!(key, id.0);

        self.by_element.insert(element, id);
        self.by_spring.insert(spring, id);
        if prepend {
            self.order.insert(0, id);
        } else {
            self.order.push(id);
        }
        log::debug!("created card {:?} for element {:?}", id, element);
        id
    }

    /// The card registered for `element`, if any.
    pub fn get_card(&self, element: ElementId) -> Option<CardId> {
        self.by_element.get(&element).copied()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.0)
    }

    /// Card ids from the bottom of the stack to the top.
    pub fn order(&self) -> &[CardId] {
        &self.order
    }

    /// The card rendered on top, if any.
    pub fn top(&self) -> Option<CardId> {
        self.order.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True while any card is settling in or being ejected.
    pub fn is_animating(&self) -> bool {
        !self.springs.is_idle()
    }

    fn with_card<R>(
        &mut self,
        id: CardId,
        f: impl FnOnce(&mut Card, &mut CardContext<'_>) -> R,
    ) -> Option<R> {
        let card = self.cards.get_mut(id.0)?;
        let mut ctx = CardContext {
            springs: &mut self.springs,
            emitter: &mut self.emitter,
        };
        Some(f(card, &mut ctx))
    }

    fn raise(&mut self, id: CardId) {
        if let Some(pos) = self.order.iter().position(|c| *c == id) {
            let card = self.order.remove(pos);
            self.order.push(card);
        }
    }

    /// Destroy a card and remove it from the stack. Emits `destroyCard`
    /// once; destroying an unknown or already destroyed card is a no-op.
    pub fn destroy_card(&mut self, id: CardId) -> bool {
        if !self.with_card(id, |card, ctx| card.destroy(ctx)).unwrap_or(false) {
            return false;
        }
        if let Some(card) = self.cards.remove(id.0) {
            self.by_element.remove(&card.element());
            self.by_spring.remove(&card.spring());
        }
        self.order.retain(|c| *c != id);
        log::debug!("destroyed card {:?}, {} left", id, self.cards.len());
        true
    }

    /// Route pointer input to a card.
    pub fn handle_event(&mut self, id: CardId, event: &PointerEvent) -> EventResponse {
        let response = self
            .with_card(id, |card, ctx| card.handle_event(ctx, event))
            .unwrap_or(EventResponse::Ignored);
        if response.is_handled() && matches!(event, PointerEvent::Down { .. }) {
            self.raise(id);
        }
        response
    }

    /// Begin dragging a card, cancelling any animation it is running.
    pub fn drag_start(&mut self, id: CardId) -> bool {
        let started = self
            .with_card(id, |card, ctx| card.drag_start(ctx))
            .unwrap_or(false);
        if started {
            self.raise(id);
        }
        started
    }

    /// Move a dragged card to `delta` away from where the drag started.
    pub fn drag_move(&mut self, id: CardId, delta_x: f32, delta_y: f32) -> bool {
        self.with_card(id, |card, ctx| card.drag_move(ctx, Offset::new(delta_x, delta_y)))
            .unwrap_or(false)
    }

    /// Release a dragged card; it is thrown in or out from where it is.
    pub fn drag_end(&mut self, id: CardId) -> bool {
        self.with_card(id, |card, ctx| card.drag_end(ctx))
            .unwrap_or(false)
    }

    /// Animate a card back to rest from `(from_x, from_y)`.
    pub fn throw_in(&mut self, id: CardId, from_x: f32, from_y: f32, direction: Direction) -> bool {
        self.with_card(id, |card, ctx| {
            card.throw_in(ctx, Offset::new(from_x, from_y), direction)
        })
        .unwrap_or(false)
    }

    /// Eject a card from `(from_x, from_y)`. Without a direction it is
    /// classified from the coordinates.
    pub fn throw_out(
        &mut self,
        id: CardId,
        from_x: f32,
        from_y: f32,
        direction: Option<Direction>,
    ) -> bool {
        self.with_card(id, |card, ctx| {
            card.throw_out(ctx, Offset::new(from_x, from_y), direction)
        })
        .unwrap_or(false)
    }

    /// Advance every running animation by `dt`. Cards whose throw-out
    /// finished are destroyed. Returns true while anything is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut ejected = Vec::new();
        for update in self.springs.tick(dt) {
            let Some(&id) = self.by_spring.get(&update.id) else {
                continue;
            };
            let outcome = self.with_card(id, |card, ctx| {
                card.on_spring_update(ctx, update.position, update.at_rest)
            });
            if outcome == Some(SpringOutcome::Ejected) {
                ejected.push(id);
            }
        }
        for id in ejected {
            self.destroy_card(id);
        }
        self.is_animating()
    }

    /// Destroy every card, then detach all springs.
    pub fn teardown(&mut self) {
        log::debug!("tearing down stack with {} card(s)", self.cards.len());
        for id in self.order.clone() {
            self.destroy_card(id);
        }
        self.springs.teardown();
        self.by_element.clear();
        self.by_spring.clear();
        self.order.clear();
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("cards", &self.cards.len())
            .field("order", &self.order)
            .field("animating", &self.springs.active_count())
            .field("emitter", &self.emitter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{CardTransform, SpringConfig};
    use crate::card::CardState;
    use crate::geometry::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_micros(16_667);

    #[derive(Default)]
    struct Siblings(Vec<u64>);

    struct NodeSurface {
        id: u64,
        parent: Rc<RefCell<Siblings>>,
    }

    impl NodeSurface {
        fn boxed(id: u64, parent: &Rc<RefCell<Siblings>>) -> Box<dyn Surface> {
            Box::new(Self {
                id,
                parent: Rc::clone(parent),
            })
        }
    }

    impl Surface for NodeSurface {
        fn element_id(&self) -> ElementId {
            ElementId(self.id)
        }

        fn bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 100.0, 100.0)
        }

        fn set_transform(&mut self, _transform: CardTransform) {}

        fn append_to_parent(&mut self) {
            let mut parent = self.parent.borrow_mut();
            parent.0.retain(|id| *id != self.id);
            parent.0.push(self.id);
        }

        fn prepend_to_parent(&mut self) {
            let mut parent = self.parent.borrow_mut();
            parent.0.retain(|id| *id != self.id);
            parent.0.insert(0, self.id);
        }
    }

    fn run_until_idle(stack: &mut Stack) {
        for _ in 0..600 {
            if !stack.tick(FRAME) {
                return;
            }
        }
        panic!("stack never came to rest");
    }

    #[test]
    fn test_create_and_lookup() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let a = stack.create_card(NodeSurface::boxed(1, &parent), false);
        let b = stack.create_card(NodeSurface::boxed(2, &parent), false);

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.get_card(ElementId(1)), Some(a));
        assert_eq!(stack.get_card(ElementId(2)), Some(b));
        assert_eq!(stack.get_card(ElementId(3)), None);
        assert_eq!(stack.card(a).map(Card::state), Some(CardState::Idle));
    }

    #[test]
    fn test_registering_element_twice_returns_existing_card() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let first = stack.create_card(NodeSurface::boxed(1, &parent), false);
        let second = stack.create_card(NodeSurface::boxed(1, &parent), true);
        assert_eq!(first, second);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.spring_system().len(), 1);
    }

    #[test]
    fn test_sibling_order() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let a = stack.create_card(NodeSurface::boxed(1, &parent), false);
        let b = stack.create_card(NodeSurface::boxed(2, &parent), false);
        let c = stack.create_card(NodeSurface::boxed(3, &parent), true);

        assert_eq!(stack.order(), &[c, a, b]);
        assert_eq!(parent.borrow().0, vec![3, 1, 2]);

        stack.drag_start(a);
        assert_eq!(stack.top(), Some(a));
        assert_eq!(parent.borrow().0, vec![3, 2, 1]);
    }

    #[test]
    fn test_throw_out_removes_card() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let card = stack.create_card(NodeSurface::boxed(1, &parent), false);

        stack.drag_start(card);
        stack.drag_move(card, -90.0, 0.0);
        stack.drag_end(card);
        assert!(stack.is_animating());

        run_until_idle(&mut stack);
        assert!(stack.card(card).is_none());
        assert_eq!(stack.get_card(ElementId(1)), None);
        assert!(stack.order().is_empty());
        assert!(stack.spring_system().is_empty());
    }

    #[test]
    fn test_throw_in_keeps_card() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let card = stack.create_card(NodeSurface::boxed(1, &parent), false);

        stack.drag_start(card);
        stack.drag_move(card, 20.0, 20.0);
        stack.drag_end(card);
        run_until_idle(&mut stack);

        let card = stack.card(card).unwrap();
        assert_eq!(card.state(), CardState::Idle);
        assert_eq!(card.transform(), CardTransform::IDENTITY);
    }

    #[test]
    fn test_overdamped_card_springs_settle() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let heavy = SpringConfig::from_origami(250.0, 200.0);
        let mut stack = Stack::new(
            Config::default()
                .with_throw_in_spring(heavy)
                .with_throw_out_spring(heavy),
        );
        let card = stack.create_card(NodeSurface::boxed(1, &parent), false);

        stack.drag_start(card);
        stack.drag_move(card, 30.0, 0.0);
        stack.drag_end(card);
        for _ in 0..3600 {
            if !stack.tick(FRAME) {
                break;
            }
            let offset = stack.card(card).unwrap().offset();
            assert!(offset.x.is_finite() && offset.y.is_finite());
        }
        assert!(!stack.is_animating());
        assert_eq!(stack.card(card).unwrap().transform(), CardTransform::IDENTITY);
    }

    #[test]
    fn test_destroy_twice() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let card = stack.create_card(NodeSurface::boxed(1, &parent), false);
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        stack.on(EventKind::DestroyCard, move |_| *c.borrow_mut() += 1);

        assert!(stack.destroy_card(card));
        assert!(!stack.destroy_card(card));
        assert_eq!(*count.borrow(), 1);

        // Operations on a destroyed card are no-ops
        assert!(!stack.drag_start(card));
        assert!(!stack.throw_out(card, 100.0, 0.0, None));
        assert!(stack.on_card(card, EventKind::DragStart, |_| {}).is_none());
    }

    #[test]
    fn test_card_listeners_are_dropped_on_destroy() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let card = stack.create_card(NodeSurface::boxed(1, &parent), false);
        stack.on_card(card, EventKind::DragStart, |_| {});
        stack.on_card(card, EventKind::DestroyCard, |_| {});
        assert_eq!(stack.emitter.listener_count(), 2);

        stack.destroy_card(card);
        assert_eq!(stack.emitter.listener_count(), 0);
    }

    #[test]
    fn test_new_card_after_destroy_gets_fresh_id() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let old = stack.create_card(NodeSurface::boxed(1, &parent), false);
        stack.destroy_card(old);

        let new = stack.create_card(NodeSurface::boxed(1, &parent), false);
        assert_ne!(old, new);
        assert!(stack.card(old).is_none());
        assert!(stack.card(new).is_some());
    }

    #[test]
    fn test_teardown() {
        let parent = Rc::new(RefCell::new(Siblings::default()));
        let mut stack = Stack::default();
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        let d = Rc::clone(&destroyed);
        stack.on(EventKind::DestroyCard, move |e| d.borrow_mut().push(e.target().element));

        let a = stack.create_card(NodeSurface::boxed(1, &parent), false);
        stack.create_card(NodeSurface::boxed(2, &parent), false);
        stack.throw_out(a, 60.0, 0.0, Some(Direction::Right));

        stack.teardown();
        assert!(stack.is_empty());
        assert!(!stack.is_animating());
        assert_eq!(*destroyed.borrow(), vec![ElementId(1), ElementId(2)]);
    }
}
