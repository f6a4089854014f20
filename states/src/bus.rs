//! Scoped event listeners.
//!
//! An [`EventBus`] fans events out to live [`Subscription`]s. A subscription is
//! registered for exactly as long as the guard value exists: dropping it
//! removes the listener, so listeners cannot leak past their owner.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use flume::{Receiver, Sender};

struct Listeners<E> {
    next_id: u64,
    senders: BTreeMap<u64, Sender<E>>,
}

/// Single-threaded broadcast of events of type `E`.
///
/// Cloning the bus yields another handle to the same listener set.
pub struct EventBus<E> {
    listeners: Rc<RefCell<Listeners<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                senders: BTreeMap::new(),
            })),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.borrow().senders.len())
            .finish()
    }
}

impl<E: Clone> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener that stays attached until the returned guard drops.
    pub fn subscribe(&self) -> Subscription<E> {
        let (send, recv) = flume::unbounded();
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, send);

        Subscription {
            id,
            recv,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Delivers `event` to every live listener and returns how many received it.
    pub fn emit(&self, event: &E) -> usize {
        let listeners = self.listeners.borrow();
        listeners
            .senders
            .values()
            .filter(|send| send.send(event.clone()).is_ok())
            .count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().senders.len()
    }
}

/// Guard for a registered listener. Unregisters on drop.
pub struct Subscription<E> {
    id: u64,
    recv: Receiver<E>,
    listeners: Weak<RefCell<Listeners<E>>>,
}

impl<E> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("queued", &self.recv.len())
            .finish()
    }
}

impl<E> Subscription<E> {
    /// Takes every event delivered since the last drain.
    pub fn drain(&self) -> Vec<E> {
        self.recv.try_iter().collect()
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().senders.remove(&self.id);
        }
    }
}
