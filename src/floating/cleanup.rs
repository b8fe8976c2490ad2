//! Mount watcher types and the single-slot cleanup holder.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::{ElementRef, ReferenceElement};

/// Cleanup function returned by a mount watcher.
pub type Cleanup = Box<dyn FnOnce()>;

/// Recompute the position. Handed to mount watchers.
pub type UpdateFn = Rc<dyn Fn()>;

/// Watcher installed while both elements are mounted and the floating element
/// is open. It calls the update function whenever geometry may have changed
/// (scroll, resize, ...) and returns the function that stops watching.
pub type WhileElementsMounted = Rc<dyn Fn(ReferenceElement, ElementRef, UpdateFn) -> Cleanup>;

/// Wrap a closure as a [`WhileElementsMounted`] watcher.
pub fn mount_watcher(
    watch: impl Fn(ReferenceElement, ElementRef, UpdateFn) -> Cleanup + 'static,
) -> WhileElementsMounted {
    Rc::new(watch)
}

/// Holds at most one pending cleanup.
///
/// The cleanup is taken out of the slot before it runs, so it runs once even
/// if it re-enters the binding.
#[derive(Default)]
pub(crate) struct CleanupSlot(RefCell<Option<Cleanup>>);

impl CleanupSlot {
    /// Run and clear the pending cleanup. Returns whether one ran.
    pub(crate) fn flush(&self) -> bool {
        let pending = self.0.borrow_mut().take();
        match pending {
            Some(cleanup) => {
                cleanup();
                true
            }
            None => false,
        }
    }

    /// Store `cleanup`, first running whatever was pending.
    pub(crate) fn replace(&self, cleanup: Cleanup) {
        self.flush();
        *self.0.borrow_mut() = Some(cleanup);
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.0.borrow().is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================
