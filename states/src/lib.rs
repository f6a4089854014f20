//! State runtime shared by the business and UI crates.
//!
//! Provides the type-keyed [`StateCtx`] store, manually dispatched
//! [`Command`]s, cancellable [`Delay`] deadlines and scoped [`EventBus`]
//! subscriptions. Everything here assumes a single UI thread.

mod bus;
mod command;
mod ctx;
mod error;
mod state;
mod task;

pub use bus::{EventBus, Subscription};
pub use command::Command;
pub use ctx::StateCtx;
pub use error::Error;
pub use state::State;
pub use task::{Delay, TaskHandle, TaskId};
