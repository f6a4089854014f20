use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use crate::{Command, Error, State};

/// Type-keyed store for application states and commands.
///
/// All access happens on the UI thread, so the context hands out plain
/// references instead of locks.
#[derive(Default)]
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    commands: BTreeMap<TypeId, Rc<dyn Command>>,
    pending: Vec<TypeId>,
}

impl fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("commands", &self.commands.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a state, replacing any previous value of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found::<T>("read"))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| Error::state_not_found::<T>("write"))
    }

    /// Returns the registered state of type `T`.
    ///
    /// # Panics
    /// Panics if `T` was never registered with [`Self::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Returns the registered state of type `T` mutably.
    ///
    /// # Panics
    /// Panics if `T` was never registered with [`Self::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Applies `f` to the state of type `T`.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(TypeId::of::<C>(), Rc::new(command));
    }

    /// Queues a registered command to run on the next [`Self::flush_commands`].
    pub fn dispatch<C: Command>(&mut self) {
        let id = TypeId::of::<C>();
        if self.commands.contains_key(&id) {
            debug!("Dispatch {}", type_name::<C>());
            self.pending.push(id);
        } else {
            warn!("Dispatch of unregistered command {}", type_name::<C>());
        }
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Runs queued commands in dispatch order and returns how many ran.
    ///
    /// Commands dispatched while flushing run in the same call.
    pub fn flush_commands(&mut self) -> usize {
        let mut ran = 0;
        while !self.pending.is_empty() {
            let queue = std::mem::take(&mut self.pending);
            for id in queue {
                if let Some(command) = self.commands.get(&id).cloned() {
                    command.run(self);
                    ran += 1;
                }
            }
        }
        ran
    }
}
