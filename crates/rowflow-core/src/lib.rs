//! Core systems for Rowflow.
//!
//! This crate provides the state-ownership and event-propagation engine of
//! Rowflow:
//!
//! - **Collection Controller**: Ordered, identity-keyed ownership of row
//!   controllers with idempotent removal
//! - **Row Controller**: Per-entry presentation state machine
//!   (idle → showing → dismissing → idle)
//! - **Detail Controller**: Stateless modal logic delegating intents upward
//! - **Signal/Slot System**: Type-safe change notification at the
//!   observer boundary
//! - **Dispatcher**: FIFO mailbox draining events into the collection
//!
//! The engine's load-bearing guarantee: when a detail modal requests
//! deletion of its own row, the row's `DeleteRow` delegation is withheld
//! until the presentation layer confirms the modal's teardown transition
//! has finished. Removal therefore never races an in-flight dismissal.
//!
//! # Delete Flow Example
//!
//! ```
//! use rowflow_core::{ListEvent, RowCollection, RowEvent};
//!
//! let mut collection = RowCollection::seeded(["One", "Two", "Three"]);
//! let id = collection.order()[2];
//!
//! // The user opens the third row's detail modal and taps Delete.
//! collection.handle(ListEvent::show_requested(id));
//! collection.handle(ListEvent::detail_delete_requested(id));
//!
//! // The modal is gone from the presented state, but the row survives
//! // until the presentation layer confirms teardown.
//! assert!(collection.contains(id));
//!
//! collection.handle(ListEvent::teardown_completed(id));
//! assert!(!collection.contains(id));
//! assert_eq!(collection.ordered_names(), ["One", "Two"]);
//! ```
//!
//! # Signal/Slot Example
//!
//! ```
//! use rowflow_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Dispatch Example
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

pub mod collection;
pub mod detail;
mod dispatch;
mod error;
mod event;
pub mod logging;
pub mod row;
pub mod signal;

pub use collection::{RowCollection, RowId};
pub use detail::{DetailController, DetailState};
pub use dispatch::{Dispatcher, DispatcherHandle};
pub use error::{CollectionError, DispatchError, Result, RowflowError};
pub use event::{DetailDelegate, DetailEvent, ListEvent, RowDelegate, RowEvent};
pub use logging::CollectionDebug;
pub use row::{RowController, RowOutcome, RowPhase};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
