//! Owner-scoped maintainers and change fan-out.
//!
//! A maintainer is a callback tied to a weakly held owner. It runs with a
//! borrow of the owner every time the value it watches changes, and it is
//! discarded the first time a fan-out finds the owner gone.
//!
//! Fan-out never holds a `RefCell` borrow while user code runs, so a
//! maintainer may read the spec, register further maintainers, or set values
//! (including the one it is watching). A set that lands while the same slot
//! is being dispatched is folded into another dispatch pass instead of
//! recursing. Later passes only reach the maintainers the dispatch started
//! with; ones registered meanwhile wait for the next change.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::models::TunableValue;

/// Upper bound on dispatch passes triggered by maintainers setting the value
/// they are watching.
const MAX_DISPATCH_PASSES: usize = 32;

/// What a maintainer list is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    /// Changes to one entry
    Key(String),
    /// Show/hide of the editing surface
    ControlsVisibility,
}

type Callback = Box<dyn FnMut(&TunableValue) -> bool>;
type Liveness = Rc<dyn Fn() -> bool>;

/// A callback plus the liveness check of its owner.
pub(crate) struct Maintainer {
    alive: Liveness,
    callback: Callback,
}

impl Maintainer {
    /// Ties `maintain` to a weak reference to `owner`.
    pub(crate) fn new<O, F>(owner: &Rc<O>, mut maintain: F) -> Self
    where
        O: 'static,
        F: FnMut(&O, &TunableValue) + 'static,
    {
        let weak: Weak<O> = Rc::downgrade(owner);
        let probe = weak.clone();
        Self {
            alive: Rc::new(move || probe.strong_count() > 0),
            callback: Box::new(move |value| match weak.upgrade() {
                Some(owner) => {
                    maintain(&owner, value);
                    true
                }
                None => false,
            }),
        }
    }

    /// Whether the owner still exists.
    pub(crate) fn is_alive(&self) -> bool {
        (self.alive)()
    }

    /// Runs the callback. Returns `false` when the owner is gone.
    pub(crate) fn invoke(&mut self, value: &TunableValue) -> bool {
        (self.callback)(value)
    }
}

/// Maintainer lists for every slot of one spec.
#[derive(Default)]
pub(crate) struct MaintainerRegistry {
    slots: RefCell<HashMap<Slot, Vec<Maintainer>>>,
    /// Liveness of the maintainers a running dispatch has taken out of `slots`
    in_flight: RefCell<HashMap<Slot, Vec<Liveness>>>,
    dispatching: RefCell<HashSet<Slot>>,
    pending: RefCell<HashSet<Slot>>,
}

impl MaintainerRegistry {
    /// Adds a maintainer. It is not invoked here.
    pub(crate) fn register(&self, slot: Slot, maintainer: Maintainer) {
        self.slots
            .borrow_mut()
            .entry(slot)
            .or_default()
            .push(maintainer);
    }

    /// Number of maintainers whose owner is alive. Dead ones are dropped.
    ///
    /// Maintainers being dispatched right now are counted too.
    pub(crate) fn live_count(&self, slot: &Slot) -> usize {
        let registered = self.slots.borrow_mut().get_mut(slot).map_or(0, |list| {
            list.retain(Maintainer::is_alive);
            list.len()
        });
        let dispatching = self
            .in_flight
            .borrow()
            .get(slot)
            .map_or(0, |probes| probes.iter().filter(|alive| alive()).count());
        registered + dispatching
    }

    /// Calls every live maintainer of `slot` with the value `current` reports.
    ///
    /// `current` is consulted at the start of each pass so that a maintainer
    /// setting the watched value causes one more pass with the new value.
    pub(crate) fn notify<F>(&self, slot: &Slot, current: F)
    where
        F: Fn() -> Option<TunableValue>,
    {
        let busy = self.dispatching.borrow().contains(slot);
        if busy {
            self.pending.borrow_mut().insert(slot.clone());
            return;
        }
        self.dispatching.borrow_mut().insert(slot.clone());

        let mut active = self
            .slots
            .borrow_mut()
            .get_mut(slot)
            .map(std::mem::take)
            .unwrap_or_default();

        for pass in 0..MAX_DISPATCH_PASSES {
            let Some(value) = current() else { break };

            self.in_flight.borrow_mut().insert(
                slot.clone(),
                active.iter().map(|maintainer| Rc::clone(&maintainer.alive)).collect(),
            );
            let before = active.len();

            active.retain_mut(|maintainer| maintainer.invoke(&value));

            let dropped = before - active.len();
            if dropped > 0 {
                trace!(?slot, dropped, "dropped maintainers with released owners");
            }

            if !self.pending.borrow_mut().remove(slot) {
                break;
            }
            if pass + 1 == MAX_DISPATCH_PASSES {
                warn!(?slot, "maintainers kept changing the value they watch; giving up");
            }
        }

        self.in_flight.borrow_mut().remove(slot);
        {
            let mut slots = self.slots.borrow_mut();
            let list = slots.entry(slot.clone()).or_default();
            // Anything in the list now was registered during the dispatch.
            let added = std::mem::take(list);
            *list = active;
            list.extend(added);
        }

        self.pending.borrow_mut().remove(slot);
        self.dispatching.borrow_mut().remove(slot);
    }
}
