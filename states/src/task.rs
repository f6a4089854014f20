//! Cancellable scheduled work for the frame loop.
//!
//! - `TaskId`: identifies a scheduled task by owner type and generation
//! - `TaskHandle`: wraps a `CancellationToken` from `tokio_util`
//! - `Delay`: a one-shot deadline that is polled by the frame loop and
//!   cancelled when it is dropped
//!
//! There is no executor here. The UI loop polls `Delay::is_due` with its own
//! clock and schedules a repaint for `Delay::remaining`.

use std::any::TypeId;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Unique identifier for a scheduled task.
///
/// Combines the `TypeId` of the owner with a generation counter so that a
/// stale task can be told apart from its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    /// Higher generation values indicate more recently scheduled tasks.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a scheduled task with cooperative cancellation.
///
/// Clones share the same token: cancelling one cancels all.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns a clone of the cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A one-shot deadline measured on the caller's clock.
///
/// A `Delay` never fires once cancelled, and dropping it cancels it, so a
/// deadline cannot outlive the value that owns it.
#[derive(Debug)]
pub struct Delay {
    handle: TaskHandle,
    due_at: Duration,
}

impl Delay {
    /// Schedules a deadline `delay` after `now`.
    pub fn schedule(id: TaskId, now: Duration, delay: Duration) -> Self {
        Self {
            handle: TaskHandle::new(id, CancellationToken::new()),
            due_at: now.saturating_add(delay),
        }
    }

    pub fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    pub fn due_at(&self) -> Duration {
        self.due_at
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: Duration) -> Duration {
        self.due_at.saturating_sub(now)
    }

    pub fn is_due(&self, now: Duration) -> bool {
        !self.handle.is_cancelled() && now >= self.due_at
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

impl Drop for Delay {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_id(generation: u64) -> TaskId {
        TaskId::new(TypeId::of::<String>(), generation)
    }

    #[test]
    fn task_id_equality() {
        let id1 = task_id(1);
        let id2 = task_id(1);
        let id3 = task_id(2);
        let id4 = TaskId::new(TypeId::of::<i32>(), 1);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_ne!(id1, id4);
        assert_eq!(id1.generation(), 1);
    }

    #[test]
    fn task_handle_clone_shares_token() {
        let handle1 = TaskHandle::new(task_id(1), CancellationToken::new());
        let handle2 = handle1.clone();

        handle1.cancel();

        assert!(handle1.is_cancelled());
        assert!(handle2.is_cancelled());
    }

    #[test]
    fn delay_is_due_at_deadline() {
        let delay = Delay::schedule(task_id(1), Duration::from_millis(50), Duration::from_millis(200));

        assert_eq!(delay.due_at(), Duration::from_millis(250));
        assert!(!delay.is_due(Duration::from_millis(249)));
        assert!(delay.is_due(Duration::from_millis(250)));
        assert_eq!(delay.remaining(Duration::from_millis(100)), Duration::from_millis(150));
        assert_eq!(delay.remaining(Duration::from_secs(10)), Duration::ZERO);
    }

    #[test]
    fn cancelled_delay_never_fires() {
        let delay = Delay::schedule(task_id(1), Duration::ZERO, Duration::from_millis(10));
        delay.cancel();
        assert!(!delay.is_due(Duration::from_secs(1)));
    }

    #[test]
    fn dropping_delay_cancels_token() {
        let delay = Delay::schedule(task_id(3), Duration::ZERO, Duration::from_millis(10));
        let token = delay.handle().cancellation_token();
        assert!(!token.is_cancelled());

        drop(delay);
        assert!(token.is_cancelled());
    }
}
