//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the **distribution layer** for accepted workflow events: the
//! operations store applies an event to its collections first, then publishes
//! it so observers (audit logs, notification hooks, test assertions) can see
//! what happened. The collections remain the source of truth; the bus
//! stores nothing.
//!
//! Design constraints:
//!
//! - **Transport-agnostic**: the trait works with in-memory channels or any
//!   future broker.
//! - **Best-effort fan-out**: every live subscriber gets a copy of every
//!   published message; dead subscribers are dropped.
//! - **At-least-once acceptable**: observers must tolerate duplicates; the
//!   state they would derive is already held authoritatively by the store.
//! - **No storage assumptions**: losing a message never loses domain state.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to an event stream.
///
/// Each subscription receives a copy of all messages published after it was
/// created (broadcast semantics). Subscriptions are designed for
/// single-threaded consumption; messages arrive in publish order for a
/// single publisher.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. internal poisoning); failures surface to the
/// caller, which may retry. The event is already applied to the owning
/// store, so retrying publication is safe.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
