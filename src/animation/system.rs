//! Stack-wide spring scheduler.
//!
//! The [`SpringSystem`] owns every spring of a stack and advances the active
//! ones once per animation frame. Cards hold a [`SpringId`] attachment and
//! never touch the spring storage directly.
//!
//! Lifecycle: `new` → any number of `create` / `tick` / `remove` →
//! `teardown`. A spring that is stopped or removed produces no further
//! updates, which is how an in-flight animation is cancelled. Ids are
//! generational, so the handle of a removed spring stays dead even after its
//! slot is reused.

use std::time::Duration;

use super::spring::{Spring, SpringConfig};
use crate::arena::{Arena, Key};

/// Handle to a spring owned by a [`SpringSystem`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SpringId(Key);

/// Progress reported for one spring during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringUpdate {
    pub id: SpringId,
    /// Normalized progress, 0.0 at start and 1.0 at the target. May overshoot.
    pub position: f32,
    /// True on the tick the spring came to rest.
    pub at_rest: bool,
}

#[derive(Default)]
pub struct SpringSystem {
    springs: Arena<Spring>,
}

impl SpringSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spring at rest and return its handle.
    pub fn create(&mut self, config: SpringConfig) -> SpringId {
        SpringId(self.springs.insert(Spring::new(config)))
    }

    /// Detach a spring. Stale or unknown ids are ignored.
    pub fn remove(&mut self, id: SpringId) {
        self.springs.remove(id.0);
    }

    pub fn get(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id.0)
    }

    pub fn contains(&self, id: SpringId) -> bool {
        self.springs.contains(id.0)
    }

    /// Restart a spring from progress 0.0 toward 1.0.
    pub fn start(&mut self, id: SpringId, config: SpringConfig) {
        if let Some(spring) = self.springs.get_mut(id.0) {
            spring.start(config);
        }
    }

    /// Stop a spring where it is; it produces no further updates.
    pub fn stop(&mut self, id: SpringId) {
        if let Some(spring) = self.springs.get_mut(id.0) {
            spring.stop();
        }
    }

    pub fn is_at_rest(&self, id: SpringId) -> bool {
        self.get(id).map_or(true, Spring::is_at_rest)
    }

    /// Number of springs currently animating.
    pub fn active_count(&self) -> usize {
        self.springs.values().filter(|s| !s.is_at_rest()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.springs.values().all(Spring::is_at_rest)
    }

    /// Number of attached springs, animating or not.
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Advance every active spring by `dt` and report their progress.
    ///
    /// Updates are collected before being returned, so the caller reacts to a
    /// finished frame and cannot re-enter the tick for any spring.
    pub fn tick(&mut self, dt: Duration) -> Vec<SpringUpdate> {
        let mut updates = Vec::new();
        self.springs.for_each_mut(|key, spring| {
            if spring.advance(dt) {
                updates.push(SpringUpdate {
                    id: SpringId(key),
                    position: spring.position(),
                    at_rest: spring.is_at_rest(),
                });
            }
        });
        if !updates.is_empty() {
            log::trace!("SpringSystem: {} spring(s) advanced", updates.len());
        }
        updates
    }

    /// Detach every spring. Previously issued ids become stale.
    pub fn teardown(&mut self) {
        log::debug!("SpringSystem: tearing down {} spring(s)", self.springs.len());
        self.springs.clear();
    }
}
