//! Row controller: one identity-keyed child state machine.
//!
//! Each entry in the collection is driven by a [`RowController`] that
//! exclusively owns the row's presented sub-state. The presentation slot is
//! an explicit three-phase machine:
//!
//! ```text
//! Idle ──ShowDetailRequested──▶ Showing ──delete/dismiss──▶ Dismissing
//!  ▲                                                            │
//!  └───────────────────TeardownCompleted───────────────────────-┘
//! ```
//!
//! The load-bearing rule lives in the `Dismissing → Idle` edge: when a
//! delete was requested from the detail modal, the row clears its presented
//! state and waits (as a state, not a blocked thread) for the
//! presentation layer to confirm the dismissal transition has fully
//! finished. Only on that confirmation does it delegate `DeleteRow` upward.
//! Delegating any earlier would let the collection destroy an entry whose
//! modal teardown is still reading it.

use crate::detail::{DetailController, DetailState};
use crate::event::{DetailDelegate, RowDelegate, RowEvent};

/// The observable phase of a row's presentation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPhase {
    /// No modal session; presented state is absent.
    Idle,
    /// A detail modal is presented.
    Showing,
    /// Teardown initiated; waiting for the presentation layer to confirm
    /// the dismissal transition has completed.
    Dismissing,
}

/// The presentation slot itself, carrying per-phase data.
#[derive(Debug)]
enum Presentation {
    Idle,
    Showing(DetailController),
    Dismissing {
        /// Whether a `DeleteRow` delegation is owed once teardown completes.
        delete_on_complete: bool,
    },
}

/// What a row reports back to its owner after handling an event.
///
/// The collection interprets these in order: presentation changes are
/// re-emitted to observers, delegations are acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The presented sub-state changed; `None` means teardown was initiated.
    PresentedChanged(Option<DetailState>),
    /// The row delegates an action to its owner.
    Delegate(RowDelegate),
}

/// Controller for a single collection entry.
///
/// Owns the row's display name and its presentation slot; mutated only
/// through [`handle`](Self::handle). Events that are not valid in the
/// current phase are traced and ignored, so stale or duplicated deliveries
/// can never corrupt the machine.
#[derive(Debug)]
pub struct RowController {
    name: String,
    presentation: Presentation,
}

impl RowController {
    /// Create a row controller with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            presentation: Presentation::Idle,
        }
    }

    /// The row's immutable display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current phase of the presentation slot.
    pub fn phase(&self) -> RowPhase {
        match self.presentation {
            Presentation::Idle => RowPhase::Idle,
            Presentation::Showing(_) => RowPhase::Showing,
            Presentation::Dismissing { .. } => RowPhase::Dismissing,
        }
    }

    /// The presented detail state, if a modal session is active.
    pub fn presented_state(&self) -> Option<DetailState> {
        match &self.presentation {
            Presentation::Showing(detail) => Some(detail.state()),
            _ => None,
        }
    }

    /// Handle an event, advancing the state machine.
    ///
    /// Returns the outcomes the owner must act on, in the order they were
    /// produced. Events invalid for the current phase return no outcomes.
    #[tracing::instrument(skip(self), target = "rowflow_core::row", level = "trace", fields(name = self.name))]
    pub fn handle(&mut self, event: RowEvent) -> Vec<RowOutcome> {
        match event {
            RowEvent::ShowDetailRequested => self.show_detail(),
            RowEvent::DismissRequested => self.begin_dismissal(false),
            RowEvent::Detail(detail_event) => {
                let delegate = match &self.presentation {
                    Presentation::Showing(detail) => detail.handle(detail_event),
                    _ => {
                        tracing::trace!(
                            target: "rowflow_core::row",
                            ?detail_event,
                            phase = ?self.phase(),
                            "detail event with no presented modal, ignoring"
                        );
                        return Vec::new();
                    }
                };
                match delegate {
                    Some(DetailDelegate::DeleteRequested) => self.begin_dismissal(true),
                    None => Vec::new(),
                }
            }
            RowEvent::TeardownCompleted => self.finish_dismissal(),
        }
    }

    /// `Idle → Showing`: materialize a detail controller from the row name.
    fn show_detail(&mut self) -> Vec<RowOutcome> {
        match self.presentation {
            Presentation::Idle => {
                let detail = DetailController::new(self.name.clone());
                let state = detail.state();
                self.presentation = Presentation::Showing(detail);
                tracing::debug!(
                    target: "rowflow_core::row",
                    name = self.name,
                    "showing detail"
                );
                vec![RowOutcome::PresentedChanged(Some(state))]
            }
            _ => {
                tracing::trace!(
                    target: "rowflow_core::row",
                    phase = ?self.phase(),
                    "show requested while not idle, ignoring"
                );
                Vec::new()
            }
        }
    }

    /// `Showing → Dismissing`: clear the presented state and start waiting
    /// for teardown confirmation. The delete delegation, if owed, is NOT
    /// produced here; it is held until [`finish_dismissal`](Self::finish_dismissal).
    fn begin_dismissal(&mut self, delete_on_complete: bool) -> Vec<RowOutcome> {
        match self.presentation {
            Presentation::Showing(_) => {
                self.presentation = Presentation::Dismissing { delete_on_complete };
                tracing::debug!(
                    target: "rowflow_core::row",
                    name = self.name,
                    delete_on_complete,
                    "dismissal initiated, awaiting teardown confirmation"
                );
                vec![RowOutcome::PresentedChanged(None)]
            }
            _ => {
                tracing::trace!(
                    target: "rowflow_core::row",
                    phase = ?self.phase(),
                    "dismissal requested with no presented modal, ignoring"
                );
                Vec::new()
            }
        }
    }

    /// `Dismissing → Idle`: teardown confirmed; emit the owed delegation.
    fn finish_dismissal(&mut self) -> Vec<RowOutcome> {
        match self.presentation {
            Presentation::Dismissing { delete_on_complete } => {
                self.presentation = Presentation::Idle;
                if delete_on_complete {
                    tracing::debug!(
                        target: "rowflow_core::row",
                        name = self.name,
                        "teardown confirmed, delegating delete"
                    );
                    vec![RowOutcome::Delegate(RowDelegate::DeleteRow)]
                } else {
                    tracing::debug!(
                        target: "rowflow_core::row",
                        name = self.name,
                        "teardown confirmed"
                    );
                    Vec::new()
                }
            }
            _ => {
                tracing::trace!(
                    target: "rowflow_core::row",
                    phase = ?self.phase(),
                    "teardown confirmation while not dismissing, ignoring"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DetailEvent;

    #[test]
    fn show_from_idle_presents_detail() {
        let mut row = RowController::new("Three");
        let outcomes = row.handle(RowEvent::ShowDetailRequested);

        assert_eq!(row.phase(), RowPhase::Showing);
        assert_eq!(
            outcomes,
            vec![RowOutcome::PresentedChanged(Some(DetailState::new("Three")))]
        );
        assert_eq!(row.presented_state().unwrap().title(), "Three");
    }

    #[test]
    fn show_while_showing_is_ignored() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);

        let outcomes = row.handle(RowEvent::ShowDetailRequested);
        assert!(outcomes.is_empty());
        assert_eq!(row.phase(), RowPhase::Showing);
    }

    #[test]
    fn show_while_dismissing_is_rejected() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);
        row.handle(RowEvent::DismissRequested);
        assert_eq!(row.phase(), RowPhase::Dismissing);

        let outcomes = row.handle(RowEvent::ShowDetailRequested);
        assert!(outcomes.is_empty());
        assert_eq!(row.phase(), RowPhase::Dismissing);
    }

    #[test]
    fn delete_request_clears_presented_but_holds_delegation() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);

        let outcomes = row.handle(RowEvent::Detail(DetailEvent::DeleteButtonTapped));

        // Teardown initiated, presented state cleared, but the delete
        // delegation is withheld until the teardown is confirmed.
        assert_eq!(row.phase(), RowPhase::Dismissing);
        assert_eq!(outcomes, vec![RowOutcome::PresentedChanged(None)]);
        assert!(row.presented_state().is_none());
    }

    #[test]
    fn teardown_confirmation_releases_delegation() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);
        row.handle(RowEvent::Detail(DetailEvent::DeleteButtonTapped));

        let outcomes = row.handle(RowEvent::TeardownCompleted);

        assert_eq!(row.phase(), RowPhase::Idle);
        assert_eq!(outcomes, vec![RowOutcome::Delegate(RowDelegate::DeleteRow)]);
    }

    #[test]
    fn plain_close_delegates_nothing() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);

        let outcomes = row.handle(RowEvent::DismissRequested);
        assert_eq!(outcomes, vec![RowOutcome::PresentedChanged(None)]);
        assert_eq!(row.phase(), RowPhase::Dismissing);

        let outcomes = row.handle(RowEvent::TeardownCompleted);
        assert!(outcomes.is_empty());
        assert_eq!(row.phase(), RowPhase::Idle);
    }

    #[test]
    fn delete_request_while_idle_is_ignored() {
        let mut row = RowController::new("Three");
        let outcomes = row.handle(RowEvent::Detail(DetailEvent::DeleteButtonTapped));
        assert!(outcomes.is_empty());
        assert_eq!(row.phase(), RowPhase::Idle);
    }

    #[test]
    fn duplicate_teardown_confirmation_is_ignored() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);
        row.handle(RowEvent::DismissRequested);
        row.handle(RowEvent::TeardownCompleted);

        let outcomes = row.handle(RowEvent::TeardownCompleted);
        assert!(outcomes.is_empty());
        assert_eq!(row.phase(), RowPhase::Idle);
    }

    #[test]
    fn stalled_confirmation_leaves_row_dismissing() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);
        row.handle(RowEvent::Detail(DetailEvent::DeleteButtonTapped));

        // No confirmation ever arrives: the row stays parked, nothing fires.
        assert_eq!(row.phase(), RowPhase::Dismissing);
        let outcomes = row.handle(RowEvent::DismissRequested);
        assert!(outcomes.is_empty());
        assert_eq!(row.phase(), RowPhase::Dismissing);
    }

    #[test]
    fn row_can_show_again_after_full_cycle() {
        let mut row = RowController::new("Three");
        row.handle(RowEvent::ShowDetailRequested);
        row.handle(RowEvent::DismissRequested);
        row.handle(RowEvent::TeardownCompleted);

        let outcomes = row.handle(RowEvent::ShowDetailRequested);
        assert_eq!(row.phase(), RowPhase::Showing);
        assert_eq!(
            outcomes,
            vec![RowOutcome::PresentedChanged(Some(DetailState::new("Three")))]
        );
    }
}
