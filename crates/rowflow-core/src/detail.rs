//! Detail controller: the ephemeral modal session.
//!
//! A [`DetailController`] exists only while its row has a presented modal.
//! It owns nothing but the display data for that session and has exactly one
//! outbound intent: asking its owner to delete the row. It never performs
//! the deletion itself and never mutates its own state.

use crate::event::{DetailDelegate, DetailEvent};

/// Display data for one modal session.
///
/// Created by the owning row when the modal is shown, destroyed when the
/// dismissal completes; never stored outside that window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    title: String,
}

impl DetailState {
    /// Create detail state with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// The modal's title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Controller for a presented detail modal.
///
/// Stateless beyond its immutable [`DetailState`]; see the module docs.
#[derive(Debug)]
pub struct DetailController {
    state: DetailState,
}

impl DetailController {
    /// Create a detail controller titled after the owning row.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: DetailState::new(title),
        }
    }

    /// The modal's title.
    pub fn title(&self) -> &str {
        self.state.title()
    }

    /// A copy of the display state, for presentation-layer payloads.
    pub fn state(&self) -> DetailState {
        self.state.clone()
    }

    /// Handle an event, returning the delegated intent if one is produced.
    ///
    /// `DeleteButtonTapped` yields exactly one `DeleteRequested` delegation
    /// and nothing else; there are no error conditions.
    pub fn handle(&self, event: DetailEvent) -> Option<DetailDelegate> {
        match event {
            DetailEvent::DeleteButtonTapped => {
                tracing::trace!(
                    target: "rowflow_core::detail",
                    title = self.state.title(),
                    "delete button tapped, delegating to owner"
                );
                Some(DetailDelegate::DeleteRequested)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_tap_delegates_upward() {
        let detail = DetailController::new("Three");
        let delegate = detail.handle(DetailEvent::DeleteButtonTapped);
        assert_eq!(delegate, Some(DetailDelegate::DeleteRequested));
    }

    #[test]
    fn handling_does_not_mutate_state() {
        let detail = DetailController::new("Three");
        let before = detail.state();
        let _ = detail.handle(DetailEvent::DeleteButtonTapped);
        assert_eq!(detail.state(), before);
        assert_eq!(detail.title(), "Three");
    }
}
