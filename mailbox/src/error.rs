use std::{any::Any, error, result, sync::Arc};

use thiserror::Error;

use crate::entity::Id;

/// The global `Result` alias of the library.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot find mailbox details for mail list {0}")]
    FindMailboxDetailsByMailListNotFound(Id),
    #[error("cannot find mailbox details for mail group {0}")]
    FindMailboxDetailsByMailGroupNotFound(Id),
    #[error("cannot find mailbox details of user mail group {0}")]
    FindUserMailboxDetailsNotFound(Id),
    #[error("cannot find user mail group membership")]
    FindUserMailGroupMembershipNotFound,
    #[error("cannot find trash folder of mailbox {0}")]
    FindTrashFolderNotFound(Id),
    #[error("cannot load folders of mailbox {0}: system folders are missing")]
    MissingSystemFoldersError(Id),
    #[error("cannot init mailbox details")]
    InitMailboxDetailsError(#[source] Arc<Error>),
    #[error("cannot lock mail model state: lock is poisoned")]
    LockPoisonedError,

    #[error(transparent)]
    BackendError(#[from] crate::backend::Error),
}

impl Error {
    /// Return `true` if the error is a lookup miss, either local or
    /// remote.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FindMailboxDetailsByMailListNotFound(_)
            | Self::FindMailboxDetailsByMailGroupNotFound(_)
            | Self::FindUserMailboxDetailsNotFound(_)
            | Self::FindUserMailGroupMembershipNotFound
            | Self::FindTrashFolderNotFound(_) => true,
            Self::BackendError(err) => err.is_not_found(),
            Self::InitMailboxDetailsError(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Return `true` if the error comes from a remote command
    /// refused because another operation holds its target.
    pub fn is_precondition_failed(&self) -> bool {
        match self {
            Self::BackendError(err) => err.is_precondition_failed(),
            Self::InitMailboxDetailsError(err) => err.is_precondition_failed(),
            _ => false,
        }
    }
}

/// The global any `Result` alias of the library.
///
/// The difference with [`Result`] is that it takes a dynamic error
/// `Box<dyn AnyError>`.
pub type AnyResult<T> = result::Result<T, AnyBoxedError>;

/// The global, dowcastable any `Error` trait of the library.
///
/// This trait is used when an error that is not known at compilation
/// time cannot be placed in a generic due to object-safe trait
/// constraint. The main use case is for transport errors reported by
/// the backend ports, and for host handlers.
pub trait AnyError: error::Error + Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl AnyError for Error {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl AnyError for std::io::Error {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The global any boxed `Error` alias of the library.
pub type AnyBoxedError = Box<dyn AnyError + Send + 'static>;

impl error::Error for AnyBoxedError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.as_ref().source()
    }
}

impl From<Error> for AnyBoxedError {
    fn from(err: Error) -> Self {
        Box::new(err)
    }
}

impl From<std::io::Error> for AnyBoxedError {
    fn from(err: std::io::Error) -> Self {
        Box::new(err)
    }
}
