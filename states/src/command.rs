use std::any::Any;

use crate::StateCtx;

/// A manual-only action that mutates state when dispatched.
///
/// Commands are registered once with [`StateCtx::record_command`] and queued with
/// [`StateCtx::dispatch`]. Queued commands run in dispatch order when the frame
/// loop calls [`StateCtx::flush_commands`].
pub trait Command: Any {
    fn run(&self, ctx: &mut StateCtx);
}
