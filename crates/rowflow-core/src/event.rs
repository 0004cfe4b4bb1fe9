//! Event types routed through the Rowflow controller hierarchy.
//!
//! Events form a tree that mirrors ownership: the collection receives
//! [`ListEvent`]s, unwraps them to a [`RowEvent`] for the addressed row, and
//! the row routes [`DetailEvent`]s into its presented detail controller.
//! Information flowing the other way (a child telling its owner to act) uses the
//! delegate enums ([`DetailDelegate`], [`RowDelegate`]), which carry no
//! payload beyond the intent itself; the owner already knows which child it
//! is talking to.

use crate::collection::RowId;

/// Top-level events accepted by the collection controller.
///
/// These are what the outside world (UI layer, presentation layer) posts to
/// the [`Dispatcher`](crate::Dispatcher); each names the row it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// An event addressed to a single row.
    Row {
        /// The row the event targets.
        id: RowId,
        /// The event to route into that row's controller.
        event: RowEvent,
    },
}

impl ListEvent {
    /// The user asked to open the detail modal for a row.
    pub fn show_requested(id: RowId) -> Self {
        Self::Row {
            id,
            event: RowEvent::ShowDetailRequested,
        }
    }

    /// The user asked to close the detail modal without further action.
    pub fn dismiss_requested(id: RowId) -> Self {
        Self::Row {
            id,
            event: RowEvent::DismissRequested,
        }
    }

    /// The delete button inside a row's detail modal was tapped.
    pub fn detail_delete_requested(id: RowId) -> Self {
        Self::Row {
            id,
            event: RowEvent::Detail(DetailEvent::DeleteButtonTapped),
        }
    }

    /// The presentation layer confirms the dismissal transition for a row's
    /// modal has fully finished (animation done, view unmounted).
    pub fn teardown_completed(id: RowId) -> Self {
        Self::Row {
            id,
            event: RowEvent::TeardownCompleted,
        }
    }

    /// The row this event is addressed to.
    pub fn row_id(&self) -> RowId {
        match self {
            Self::Row { id, .. } => *id,
        }
    }
}

/// Events handled by a single row controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    /// Open the detail modal. Valid only while nothing is presented.
    ShowDetailRequested,
    /// Close the presented modal without deleting the row.
    DismissRequested,
    /// An event for the presented detail controller.
    Detail(DetailEvent),
    /// Confirmation from the presentation layer that modal teardown finished.
    TeardownCompleted,
}

/// Events handled by a detail controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEvent {
    /// The modal's delete button was tapped.
    DeleteButtonTapped,
}

/// Intent a detail controller delegates up to its owning row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailDelegate {
    /// The user asked to delete the row this modal belongs to.
    DeleteRequested,
}

/// Intent a row controller delegates up to the collection.
///
/// Emitted only after the row's presented sub-state has been torn down and
/// the teardown confirmed; see [`RowController`](crate::RowController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDelegate {
    /// Remove this row's entry from the collection.
    DeleteRow,
}
