use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

/// Something that can redraw itself once per frame.
pub trait Replay {
    fn replay(&self);
}

struct HookEntry {
    id: u64,
    target: Weak<RefCell<dyn Replay>>,
}

#[derive(Default)]
struct HookTable {
    next_id: u64,
    entries: Vec<HookEntry>,
}

/// Per-frame redraw registry owned by a surface.
///
/// Entries hold weak references only: a registered turtle that gets dropped
/// is pruned on the next [`FrameHooks::run_frame`]. Registration hands back a
/// [`Subscription`] which is the only way to deregister a live target.
#[derive(Default)]
pub struct FrameHooks {
    table: Rc<RefCell<HookTable>>,
}

impl FrameHooks {
    pub fn new() -> FrameHooks {
        FrameHooks::default()
    }

    pub fn register<R: Replay + 'static>(&self, target: &Rc<RefCell<R>>) -> Subscription {
        let shared: Rc<RefCell<dyn Replay>> = target.clone();
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push(HookEntry {
            id,
            target: Rc::downgrade(&shared),
        });
        debug!(hook = id, registered = table.entries.len(), "frame hook registered");
        Subscription {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Replay every live registered target in registration order.
    /// Returns how many targets were replayed.
    pub fn run_frame(&self) -> usize {
        // Collect first so a replay may register or unsubscribe without
        // tripping over our borrow of the table.
        let live: Vec<(u64, Rc<RefCell<dyn Replay>>)> = {
            let mut table = self.table.borrow_mut();
            table.entries.retain(|entry| entry.target.strong_count() > 0);
            table
                .entries
                .iter()
                .filter_map(|entry| entry.target.upgrade().map(|t| (entry.id, t)))
                .collect()
        };

        let mut replayed = 0;
        for (id, target) in live {
            match target.try_borrow() {
                Ok(target) => {
                    target.replay();
                    replayed += 1;
                }
                Err(_) => warn!(hook = id, "target is mutably borrowed, skipping this frame"),
            }
        }
        trace!(replayed, "frame complete");
        replayed
    }

    /// Number of registered entries, including ones whose target has been
    /// dropped but not yet pruned.
    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`FrameHooks::register`].
///
/// Dropping the handle does *not* deregister; call
/// [`Subscription::unsubscribe`].
#[derive(Debug)]
#[must_use = "a frame hook stays registered until unsubscribed"]
pub struct Subscription {
    id: u64,
    table: Weak<RefCell<HookTable>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the hook. Returns false if it was already gone (the registry
    /// was dropped, or the target was dropped and pruned).
    pub fn unsubscribe(self) -> bool {
        let Some(table) = self.table.upgrade() else {
            return false;
        };
        let mut table = table.borrow_mut();
        let before = table.entries.len();
        table.entries.retain(|entry| entry.id != self.id);
        let removed = table.entries.len() < before;
        debug!(hook = self.id, removed, "frame hook unsubscribed");
        removed
    }
}
