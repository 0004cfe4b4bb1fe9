//! Logging and debugging facilities for Rowflow.
//!
//! Rowflow uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! [`CollectionDebug`] renders a human-readable snapshot of a collection's
//! rows and their presentation phases, useful when diagnosing a stuck
//! dismissal.

use std::fmt::{self, Write as FmtWrite};

use crate::collection::RowCollection;
use crate::row::RowPhase;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "rowflow_core";
    /// Collection controller target.
    pub const COLLECTION: &str = "rowflow_core::collection";
    /// Row controller target.
    pub const ROW: &str = "rowflow_core::row";
    /// Detail controller target.
    pub const DETAIL: &str = "rowflow_core::detail";
    /// Signal plumbing target.
    pub const SIGNAL: &str = "rowflow_core::signal";
    /// Event dispatch target.
    pub const DISPATCH: &str = "rowflow_core::dispatch";
}

/// Debug utility for visualizing a collection's rows and phases.
#[derive(Clone)]
pub struct CollectionDebug<'a> {
    collection: &'a RowCollection,
    /// Whether to include row IDs in the output.
    show_ids: bool,
}

impl<'a> CollectionDebug<'a> {
    /// Create a debug view of a collection.
    pub fn new(collection: &'a RowCollection) -> Self {
        Self {
            collection,
            show_ids: false,
        }
    }

    /// Include row IDs in the output.
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Render the collection as a multi-line listing.
    pub fn format(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Row collection ({} rows):", self.collection.len())
            .expect("write to String");

        if self.collection.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
            return output;
        }

        for &id in self.collection.order() {
            let name = self.collection.display_name(id).unwrap_or("(unknown)");
            output.push_str("  ");
            output.push_str(name);
            if self.show_ids {
                write!(output, " [{:?}]", id).expect("write to String");
            }
            match self.collection.phase(id) {
                Ok(RowPhase::Idle) => {}
                Ok(RowPhase::Showing) => {
                    let title = self
                        .collection
                        .presented_title(id)
                        .unwrap_or_else(|_| "?".to_string());
                    write!(output, " (showing \"{title}\")").expect("write to String");
                }
                Ok(RowPhase::Dismissing) => {
                    output.push_str(" (dismissing, awaiting teardown)");
                }
                Err(_) => {}
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for CollectionDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}
