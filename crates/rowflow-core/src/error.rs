//! Error types for Rowflow.
//!
//! Errors here only surface from the query/accessor API. Event routing never
//! fails: invalid transitions and stale identities are handled as logged
//! no-ops inside the controllers, per the collection's defensive boundary.

use std::fmt;

/// The main error type for Rowflow operations.
#[derive(Debug)]
pub enum RowflowError {
    /// Collection-related error.
    Collection(CollectionError),
    /// Dispatch-related error.
    Dispatch(DispatchError),
}

impl fmt::Display for RowflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection(err) => write!(f, "Collection error: {err}"),
            Self::Dispatch(err) => write!(f, "Dispatch error: {err}"),
        }
    }
}

impl std::error::Error for RowflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            Self::Dispatch(err) => Some(err),
        }
    }
}

impl From<CollectionError> for RowflowError {
    fn from(err: CollectionError) -> Self {
        Self::Collection(err)
    }
}

impl From<DispatchError> for RowflowError {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

/// Collection-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// The row ID is not (or no longer) in the collection.
    UnknownRow,
    /// The row has no presented detail sub-state.
    NotPresented,
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRow => write!(f, "Unknown or removed row ID"),
            Self::NotPresented => write!(f, "Row has no presented detail state"),
        }
    }
}

impl std::error::Error for CollectionError {}

/// Dispatch-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The dispatcher was dropped; its mailbox no longer accepts events.
    QueueClosed,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueClosed => write!(f, "Dispatcher has been dropped"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// A specialized Result type for Rowflow operations.
pub type Result<T> = std::result::Result<T, RowflowError>;
