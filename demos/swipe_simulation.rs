//! Headless swipe simulation.
//!
//! Builds a stack of three cards, throws the top one out to the left, drops
//! the next one back in, and ticks at 60 fps until everything settles.
//!
//! Run with `RUST_LOG=debug` to see the state machine.

use std::time::Duration;

use swing_stack::prelude::*;

const FRAME: Duration = Duration::from_micros(16_667);

struct HeadlessCard {
    id: u64,
    transform: CardTransform,
}

impl Surface for HeadlessCard {
    fn element_id(&self) -> ElementId {
        ElementId(self.id)
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 320.0, 480.0)
    }

    fn set_transform(&mut self, transform: CardTransform) {
        self.transform = transform;
        log::trace!("card {}: {}", self.id, transform.to_css());
    }
}

fn settle(stack: &mut Stack) -> usize {
    let mut frames = 0;
    while stack.tick(FRAME) {
        frames += 1;
    }
    frames + 1
}

fn main() {
    env_logger::init();

    let mut stack = Stack::new(
        Config::default()
            .with_allowed_directions(Directions::HORIZONTAL)
            .with_rotation(TiltRotation),
    );
    for kind in EventKind::ALL {
        stack.on(kind, |event| {
            log::info!("{} on {:?}", event.kind(), event.target().element);
        });
    }

    let cards: Vec<CardId> = (1..=3)
        .map(|id| {
            let surface = HeadlessCard {
                id,
                transform: CardTransform::IDENTITY,
            };
            stack.create_card(Box::new(surface), false)
        })
        .collect();

    // Swipe the top card far to the left with the pointer
    let top = cards[2];
    stack.handle_event(
        top,
        &PointerEvent::Down {
            x: 160.0,
            y: 300.0,
            button: MouseButton::Left,
        },
    );
    for step in 1..=10 {
        let x = 160.0 - 25.0 * step as f32;
        stack.handle_event(top, &PointerEvent::Move { x, y: 310.0 });
    }
    stack.handle_event(
        top,
        &PointerEvent::Up {
            x: -90.0,
            y: 310.0,
            button: MouseButton::Left,
        },
    );
    log::info!("throw-out settled after {} frames", settle(&mut stack));

    // Nudge the next card a little; it springs back
    let next = cards[1];
    stack.drag_start(next);
    stack.drag_move(next, 60.0, -20.0);
    stack.drag_end(next);
    log::info!("throw-in settled after {} frames", settle(&mut stack));

    log::info!("{} card(s) left: {:?}", stack.len(), stack.order());
    stack.teardown();
}
