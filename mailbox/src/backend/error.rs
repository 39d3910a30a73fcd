use std::{any::Any, result};

use thiserror::Error;

use crate::{entity::EntityKind, AnyBoxedError, AnyError};

/// The global `Result` alias of the module.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the module.
///
/// These are the error kinds the backend ports are expected to
/// report. Transports map their own failures to them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot find {kind} entity {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("cannot execute {0}: another operation is still active on the target")]
    PreconditionFailed(String),
    #[error("cannot reach remote entity store")]
    TransportFailure(#[source] AnyBoxedError),
}

impl Error {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn transport(err: impl Into<AnyBoxedError>) -> Self {
        Self::TransportFailure(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, Self::PreconditionFailed(_))
    }
}

impl AnyError for Error {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Error> for AnyBoxedError {
    fn from(err: Error) -> Self {
        Box::new(err)
    }
}
