//! Cooperative event dispatch for the controller hierarchy.
//!
//! All controller operations run to completion on one event-processing
//! context: the [`Dispatcher`] drains its mailbox in FIFO order and feeds
//! each event to the collection. Concurrency in this engine is between
//! logically independent asynchronous completions, not threads: a row
//! waiting for teardown confirmation is parked as a state, and resumes when
//! the presentation layer posts the confirmation event back through a
//! [`DispatcherHandle`].
//!
//! Because draining is FIFO and each `handle` call runs to completion, the
//! per-row sequence show → delete-requested → teardown-confirmed →
//! delete-delegated → removed is totally ordered; events for different rows
//! interleave freely.
//!
//! # Example
//!
//! ```
//! use rowflow_core::{Dispatcher, ListEvent, RowCollection};
//!
//! let mut collection = RowCollection::seeded(["One", "Two"]);
//! let dispatcher = Dispatcher::new();
//! let handle = dispatcher.handle();
//!
//! let id = collection.order()[0];
//! handle.post(ListEvent::show_requested(id)).unwrap();
//! dispatcher.run_until_idle(&mut collection);
//! ```

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::collection::RowCollection;
use crate::error::{DispatchError, Result};
use crate::event::ListEvent;

/// The single-threaded event loop driving a [`RowCollection`].
///
/// Owns the mailbox; hand out clonable [`DispatcherHandle`]s to whoever
/// needs to feed events in (the UI layer, the presentation layer).
pub struct Dispatcher {
    tx: Sender<ListEvent>,
    rx: Receiver<ListEvent>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty mailbox.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// A clonable handle for posting events into the mailbox.
    pub fn handle(&self) -> DispatcherHandle {
        DispatcherHandle {
            tx: self.tx.clone(),
        }
    }

    /// Post an event directly.
    pub fn post(&self, event: ListEvent) {
        // Cannot fail: we own the receiving side.
        let _ = self.tx.send(event);
    }

    /// The number of events waiting in the mailbox.
    pub fn pending_count(&self) -> usize {
        self.rx.len()
    }

    /// Drain the mailbox, routing each event into the collection.
    ///
    /// Runs until the mailbox is empty, including events posted by slots
    /// during the drain (a presentation layer that completes teardown
    /// synchronously feeds its confirmation back into the same drain).
    /// Returns the number of events processed.
    #[tracing::instrument(skip_all, target = "rowflow_core::dispatch", level = "trace")]
    pub fn run_until_idle(&self, collection: &mut RowCollection) -> usize {
        let mut processed = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    tracing::trace!(
                        target: "rowflow_core::dispatch",
                        ?event,
                        "dispatching event"
                    );
                    collection.handle(event);
                    processed += 1;
                }
                Err(TryRecvError::Empty) => break,
                // Unreachable while `self.tx` lives, but harmless.
                Err(TryRecvError::Disconnected) => break,
            }
        }
        tracing::trace!(
            target: "rowflow_core::dispatch",
            processed,
            "mailbox drained"
        );
        processed
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// A clonable handle for posting events to a [`Dispatcher`].
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: Sender<ListEvent>,
}

impl DispatcherHandle {
    /// Post an event to the dispatcher's mailbox.
    ///
    /// Fails only if the dispatcher has been dropped.
    pub fn post(&self, event: ListEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| DispatchError::QueueClosed.into())
    }
}

static_assertions::assert_impl_all!(DispatcherHandle: Send, Sync, Clone);
