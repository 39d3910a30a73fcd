//! # Backend module
//!
//! Module dedicated to the collaborators consumed by the mail
//! model. Each collaborator is a narrow port, implemented by the
//! host:
//!
//! - [`LoadEntity`] reads entities from the remote entity store,
//! - [`SendCommand`] sends commands to remote services,
//! - [`Session`] exposes the signed-in identity and its
//!   capabilities.
//!
//! Request encoding, authentication and timeouts belong to the
//! implementations, not to this library.

mod error;

use std::fmt;

use async_trait::async_trait;

use crate::{
    entity::{Group, GroupInfo, GroupMembership, Id, IdTuple, Mailbox, MailboxGroupRoot, User},
    folder::Folder,
    message::Payload,
};

#[doc(inline)]
pub use self::error::{Error, Result};

/// The entity read port.
///
/// Every function fails with [`Error::NotFound`] when the entity
/// does not exist, or with [`Error::TransportFailure`] when the
/// remote store cannot be reached.
#[async_trait]
pub trait LoadEntity: Send + Sync {
    /// Load the mailbox group root sharing its id with the given mail
    /// group.
    async fn load_mailbox_group_root(&self, id: &Id) -> Result<MailboxGroupRoot>;

    /// Load the mailbox matching the given id.
    async fn load_mailbox(&self, id: &Id) -> Result<Mailbox>;

    /// Load the group info matching the given id.
    async fn load_group_info(&self, id: &IdTuple) -> Result<GroupInfo>;

    /// Load the group matching the given id.
    async fn load_group(&self, id: &Id) -> Result<Group>;

    /// Load the user matching the given id.
    async fn load_user(&self, id: &Id) -> Result<User>;

    /// Load all the folders of the given folder list.
    async fn load_all_folders(&self, list_id: &Id) -> Result<Vec<Folder>>;
}

/// The remote services commands can be sent to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Service {
    MailService,
    MoveMailService,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MailService => "mailservice",
            Self::MoveMailService => "movemailservice",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The method used to reach a remote service.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// The entity command port.
#[async_trait]
pub trait SendCommand: Send + Sync {
    /// Send the given payload to the given service using the given
    /// method.
    ///
    /// The function fails with [`Error::PreconditionFailed`] when
    /// another operation currently holds the targeted entities.
    async fn send_command(&self, service: Service, method: Method, payload: Payload) -> Result<()>;
}

/// The account features that can be switched on or off remotely.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Feature {
    /// Restricts the account to communication inside the
    /// organization, which makes the spam folder pointless.
    InternalCommunication,
}

/// The identity and session port.
///
/// All functions are synchronous: the session state is kept
/// up-to-date by the host.
pub trait Session: Send + Sync {
    /// The id of the signed-in user.
    fn user_id(&self) -> Id;

    /// All the mail group memberships of the signed-in user.
    fn mail_group_memberships(&self) -> Vec<GroupMembership>;

    /// The membership of the user's own (personal) mail group.
    fn user_mail_group_membership(&self) -> Option<GroupMembership>;

    /// Return `true` if the signed-in user has a full (internal)
    /// account.
    fn is_internal_user(&self) -> bool;

    /// Return `true` if the given feature is enabled for the account.
    fn is_enabled(&self, feature: Feature) -> bool;
}
