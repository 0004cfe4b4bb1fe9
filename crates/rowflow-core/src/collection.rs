//! Collection controller: the ordered, identity-keyed set of rows.
//!
//! [`RowCollection`] owns every [`RowController`](crate::RowController)
//! through an arena keyed by [`RowId`], plus a display-order list. All
//! access to a row goes through the collection's lookup; no raw references
//! to row controllers ever leave it, so a stale `RowId` can miss but can
//! never dangle.
//!
//! # Key Types
//!
//! - [`RowId`] - Stable, unique, never-reused identity for one entry
//! - [`RowCollection`] - The collection controller itself
//!
//! # Observer boundary
//!
//! Three signals carry the collection's outbound notifications:
//!
//! - `collection_changed` - emitted after a membership change is committed
//! - `presented_changed` - a row's modal was materialized or torn down
//! - `row_delete_delegated` - a row, its teardown confirmed, asked to be
//!   removed (fires strictly before the removal is committed)

use slotmap::{new_key_type, SlotMap};

use crate::detail::DetailState;
use crate::error::{CollectionError, Result};
use crate::event::{ListEvent, RowDelegate, RowEvent};
use crate::row::{RowController, RowOutcome, RowPhase};
use crate::signal::Signal;

new_key_type! {
    /// A unique identifier for a row in the collection.
    ///
    /// `RowId`s are generational arena keys: stable while the entry lives,
    /// and never reused after the entry is removed. A `RowId` held past its
    /// row's removal simply stops matching anything.
    pub struct RowId;
}

/// The collection controller.
///
/// Owns the ordered mapping from [`RowId`] to row controller. Rows are only
/// ever removed through the delete-delegation protocol: a row delegates
/// `DeleteRow` after its modal teardown has been confirmed, and only then is
/// its entry destroyed. Direct removal from a UI event is not part of the
/// surface.
pub struct RowCollection {
    /// Arena storage for row controllers.
    rows: SlotMap<RowId, RowController>,
    /// Display order; insertion order, pruned on removal.
    order: Vec<RowId>,
    /// Emitted with the new ordered membership after any committed change.
    pub collection_changed: Signal<Vec<RowId>>,
    /// Emitted when a row's presented sub-state changes; `None` payload
    /// means the presentation layer must tear the modal down and call back
    /// with [`ListEvent::teardown_completed`] once finished.
    pub presented_changed: Signal<(RowId, Option<DetailState>)>,
    /// Emitted when a row's delete delegation is received, after its
    /// teardown completed and strictly before the entry is removed.
    pub row_delete_delegated: Signal<RowId>,
}

impl RowCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            rows: SlotMap::with_key(),
            order: Vec::new(),
            collection_changed: Signal::new(),
            presented_changed: Signal::new(),
            row_delete_delegated: Signal::new(),
        }
    }

    /// Create a collection seeded with one row per name, in order.
    ///
    /// Seeding does not emit `collection_changed`; observers connect to a
    /// collection that already has its initial membership.
    pub fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collection = Self::new();
        collection.collection_changed.set_blocked(true);
        for name in names {
            collection.push_row(name);
        }
        collection.collection_changed.set_blocked(false);
        collection
    }

    /// Append a new row and return its identity.
    ///
    /// Emits `collection_changed` after the insertion is committed.
    pub fn push_row(&mut self, name: impl Into<String>) -> RowId {
        let name = name.into();
        tracing::debug!(target: "rowflow_core::collection", name, "adding row");
        let id = self.rows.insert(RowController::new(name));
        self.order.push(id);
        self.collection_changed.emit(self.order.clone());
        id
    }

    /// Remove the entry for `id` if present; no-op if absent.
    ///
    /// Emits `collection_changed` after the removal is committed, never
    /// before. Returns `true` if an entry was removed.
    pub fn remove(&mut self, id: RowId) -> bool {
        if self.rows.remove(id).is_none() {
            tracing::trace!(target: "rowflow_core::collection", ?id, "remove for absent row, ignoring");
            return false;
        }
        self.order.retain(|&row| row != id);
        tracing::debug!(
            target: "rowflow_core::collection",
            ?id,
            remaining = self.order.len(),
            "row removed"
        );
        self.collection_changed.emit(self.order.clone());
        true
    }

    /// Route an event into the row controller owning `id`.
    ///
    /// If `id` is no longer in the collection the event is logged and
    /// dropped. This is the defensive boundary: with the teardown protocol
    /// honored it should never trigger, but a stale identity must degrade
    /// to a no-op rather than a fault.
    #[tracing::instrument(skip(self), target = "rowflow_core::collection", level = "trace")]
    pub fn forward(&mut self, id: RowId, event: RowEvent) {
        let Some(row) = self.rows.get_mut(id) else {
            tracing::debug!(
                target: "rowflow_core::collection",
                ?id,
                ?event,
                "event for unknown row, ignoring"
            );
            return;
        };

        let outcomes = row.handle(event);
        for outcome in outcomes {
            match outcome {
                RowOutcome::PresentedChanged(state) => {
                    self.presented_changed.emit((id, state));
                }
                RowOutcome::Delegate(RowDelegate::DeleteRow) => {
                    self.row_delete_delegated.emit(id);
                    self.remove(id);
                }
            }
        }
    }

    /// Handle a top-level event. Entry point used by the dispatcher.
    pub fn handle(&mut self, event: ListEvent) {
        match event {
            ListEvent::Row { id, event } => self.forward(id, event),
        }
    }

    /// The current display order.
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// The number of rows in the collection.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check if a row exists in the collection.
    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains_key(id)
    }

    /// The display name of a row.
    pub fn display_name(&self, id: RowId) -> Result<&str> {
        self.rows
            .get(id)
            .map(RowController::name)
            .ok_or_else(|| CollectionError::UnknownRow.into())
    }

    /// The presentation phase of a row.
    pub fn phase(&self, id: RowId) -> Result<RowPhase> {
        self.rows
            .get(id)
            .map(RowController::phase)
            .ok_or_else(|| CollectionError::UnknownRow.into())
    }

    /// The title of a row's presented modal, if one is active.
    pub fn presented_title(&self, id: RowId) -> Result<String> {
        let row = self.rows.get(id).ok_or(CollectionError::UnknownRow)?;
        row.presented_state()
            .map(|state| state.title().to_string())
            .ok_or_else(|| CollectionError::NotPresented.into())
    }

    /// Display names in display order, for diagnostics and observers.
    pub fn ordered_names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|&id| self.rows.get(id))
            .map(|row| row.name().to_string())
            .collect()
    }
}

impl Default for RowCollection {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(RowCollection: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DetailEvent;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn seeded() -> RowCollection {
        RowCollection::seeded(["One", "Two", "Three", "Four"])
    }

    #[test]
    fn seeding_preserves_order() {
        let collection = seeded();
        assert_eq!(collection.len(), 4);
        assert_eq!(
            collection.ordered_names(),
            vec!["One", "Two", "Three", "Four"]
        );
    }

    #[test]
    fn seeding_does_not_notify() {
        // Observers connected before seeding would otherwise see four
        // partial membership snapshots.
        let notified = Arc::new(Mutex::new(0));
        let mut collection = RowCollection::new();
        let notified_clone = notified.clone();
        collection.collection_changed.connect(move |_| {
            *notified_clone.lock() += 1;
        });

        collection.collection_changed.set_blocked(true);
        collection.push_row("One");
        collection.collection_changed.set_blocked(false);
        assert_eq!(*notified.lock(), 0);

        collection.push_row("Two");
        assert_eq!(*notified.lock(), 1);
    }

    #[test]
    fn identities_are_unique() {
        let collection = seeded();
        let mut ids = collection.order().to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn identity_not_reused_after_removal() {
        let mut collection = seeded();
        let removed = collection.order()[2];
        assert!(collection.remove(removed));

        // A new row never resurrects the removed identity, and the stale
        // id no longer matches anything.
        let fresh = collection.push_row("Five");
        assert_ne!(fresh, removed);
        assert!(!collection.contains(removed));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut collection = seeded();
        let id = collection.order()[1];

        assert!(collection.remove(id));
        let after_first = collection.ordered_names();
        assert!(!collection.remove(id));
        assert_eq!(collection.ordered_names(), after_first);
    }

    #[test]
    fn remove_absent_id_is_silent() {
        let mut probe = RowCollection::new();
        let foreign = probe.push_row("ghost");
        probe.remove(foreign);

        let mut collection = seeded();
        assert!(!collection.remove(foreign));
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn collection_changed_fires_after_commit() {
        let mut collection = seeded();
        let id = collection.order()[2];

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        collection.collection_changed.connect(move |order| {
            seen_clone.lock().push(order.clone());
        });

        collection.remove(id);

        let snapshots = seen.lock();
        assert_eq!(snapshots.len(), 1);
        // The snapshot delivered to observers already excludes the row.
        assert!(!snapshots[0].contains(&id));
        assert_eq!(snapshots[0].len(), 3);
    }

    #[test]
    fn forward_to_unknown_row_is_a_no_op() {
        let mut collection = seeded();
        let id = collection.order()[0];
        collection.remove(id);

        collection.forward(id, RowEvent::ShowDetailRequested);
        collection.forward(id, RowEvent::TeardownCompleted);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn forward_routes_show_to_the_addressed_row_only() {
        let mut collection = seeded();
        let target = collection.order()[2];

        collection.forward(target, RowEvent::ShowDetailRequested);

        for &id in collection.order() {
            let expected = if id == target {
                RowPhase::Showing
            } else {
                RowPhase::Idle
            };
            assert_eq!(collection.phase(id).unwrap(), expected);
        }
        assert_eq!(collection.presented_title(target).unwrap(), "Three");
    }

    #[test]
    fn presented_changed_mirrors_row_outcomes() {
        let mut collection = seeded();
        let id = collection.order()[2];

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        collection.presented_changed.connect(move |change| {
            seen_clone.lock().push(change.clone());
        });

        collection.forward(id, RowEvent::ShowDetailRequested);
        collection.forward(id, RowEvent::Detail(DetailEvent::DeleteButtonTapped));

        let changes = seen.lock();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0], (id, Some(DetailState::new("Three"))));
        assert_eq!(changes[1], (id, None));
    }

    #[test]
    fn delete_delegation_waits_for_teardown() {
        let mut collection = seeded();
        let id = collection.order()[2];

        collection.forward(id, RowEvent::ShowDetailRequested);
        collection.forward(id, RowEvent::Detail(DetailEvent::DeleteButtonTapped));

        // Dismissal is in flight; the entry must survive until confirmed.
        assert!(collection.contains(id));
        assert_eq!(collection.phase(id).unwrap(), RowPhase::Dismissing);

        collection.forward(id, RowEvent::TeardownCompleted);
        assert!(!collection.contains(id));
        assert_eq!(collection.ordered_names(), vec!["One", "Two", "Four"]);
    }

    #[test]
    fn delegation_signal_fires_once_before_removal() {
        let mut collection = seeded();
        let id = collection.order()[2];

        let delegations = Arc::new(Mutex::new(Vec::new()));
        let removed_at_delegation = Arc::new(Mutex::new(None));
        // The delegation observer fires while the entry still exists.
        {
            let delegations = delegations.clone();
            collection.row_delete_delegated.connect(move |&row| {
                delegations.lock().push(row);
            });
        }
        {
            let removed_at_delegation = removed_at_delegation.clone();
            let delegations = delegations.clone();
            collection.collection_changed.connect(move |order| {
                *removed_at_delegation.lock() = Some((delegations.lock().len(), order.len()));
            });
        }

        collection.forward(id, RowEvent::ShowDetailRequested);
        collection.forward(id, RowEvent::Detail(DetailEvent::DeleteButtonTapped));
        collection.forward(id, RowEvent::TeardownCompleted);

        assert_eq!(*delegations.lock(), vec![id]);
        // When collection_changed fired, the delegation had already been
        // observed: delegation strictly precedes removal.
        assert_eq!(*removed_at_delegation.lock(), Some((1, 3)));
    }

    #[test]
    fn accessors_reject_unknown_rows() {
        let mut collection = seeded();
        let id = collection.order()[0];
        collection.remove(id);

        assert!(collection.display_name(id).is_err());
        assert!(collection.phase(id).is_err());
        assert!(collection.presented_title(id).is_err());
    }

    #[test]
    fn presented_title_requires_active_modal() {
        let collection = seeded();
        let id = collection.order()[0];
        assert!(matches!(
            collection.presented_title(id),
            Err(crate::RowflowError::Collection(CollectionError::NotPresented))
        ));
    }
}
