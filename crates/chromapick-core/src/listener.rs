//! Host event subscriptions.
//!
//! Key and icon-click events only reach the engine while a matching
//! [`ListenerHandle`] is alive. Handles detach themselves on drop, so a host
//! that tears down its picker cannot keep feeding events into it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Event sources the engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Document-level key presses.
    KeyDown,
    /// Clicks on the image-upload icon.
    ImageIconClick,
}

type Attached = RefCell<HashMap<ListenerKind, usize>>;

/// Tracks which listeners are attached.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    attached: Rc<Attached>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener; it stays attached until the handle is dropped.
    pub fn attach(&self, kind: ListenerKind) -> ListenerHandle {
        *self.attached.borrow_mut().entry(kind).or_insert(0) += 1;
        log::debug!("Attached {:?} listener", kind);
        ListenerHandle {
            kind,
            attached: Rc::downgrade(&self.attached),
        }
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.borrow().get(&kind).is_some_and(|&n| n > 0)
    }
}

/// Subscription guard returned by [`ListenerRegistry::attach`].
#[derive(Debug)]
#[must_use = "the listener detaches as soon as the handle is dropped"]
pub struct ListenerHandle {
    kind: ListenerKind,
    attached: Weak<Attached>,
}

impl ListenerHandle {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let Some(attached) = self.attached.upgrade() else {
            return;
        };
        let mut attached = attached.borrow_mut();
        if let Some(count) = attached.get_mut(&self.kind) {
            *count -= 1;
            if *count == 0 {
                attached.remove(&self.kind);
            }
        }
        log::debug!("Detached {:?} listener", self.kind);
    }
}

/// The pair of listeners a picker host holds for the picker's lifetime.
#[derive(Debug)]
pub struct PickerListeners {
    pub key: ListenerHandle,
    pub image_icon: ListenerHandle,
}
