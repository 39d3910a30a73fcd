//! # Entity update
//!
//! Change notifications emitted by the remote store. Notifications
//! are delivered in ordered batches and must be reasoned about batch
//! by batch, see [`MailModel::on_events`](crate::model::MailModel::on_events).

use std::fmt;

use super::{Id, IdTuple};

/// The operation applied to an entity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update)
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The change notification of a single entity.
///
/// Each variant matches an entity kind the mail model reacts to. List
/// element entities carry their full [`IdTuple`], element entities
/// only their [`Id`]. Notifications about any other entity kind end
/// up in [`EntityUpdate::Other`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntityUpdate {
    MailFolder { operation: Operation, id: IdTuple },
    GroupInfo { operation: Operation, id: IdTuple },
    User { operation: Operation, id: Id },
    Mail { operation: Operation, id: IdTuple },
    Other {
        type_ref: String,
        operation: Operation,
        instance_list_id: Option<Id>,
        instance_id: Id,
    },
}

impl EntityUpdate {
    pub fn mail_folder(operation: Operation, id: impl Into<IdTuple>) -> Self {
        Self::MailFolder {
            operation,
            id: id.into(),
        }
    }

    pub fn group_info(operation: Operation, id: impl Into<IdTuple>) -> Self {
        Self::GroupInfo {
            operation,
            id: id.into(),
        }
    }

    pub fn user(operation: Operation, id: impl Into<Id>) -> Self {
        Self::User {
            operation,
            id: id.into(),
        }
    }

    pub fn mail(operation: Operation, id: impl Into<IdTuple>) -> Self {
        Self::Mail {
            operation,
            id: id.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::MailFolder { operation, .. }
            | Self::GroupInfo { operation, .. }
            | Self::User { operation, .. }
            | Self::Mail { operation, .. }
            | Self::Other { operation, .. } => *operation,
        }
    }

    pub fn instance_id(&self) -> &Id {
        match self {
            Self::MailFolder { id, .. } | Self::GroupInfo { id, .. } | Self::Mail { id, .. } => {
                &id.element_id
            }
            Self::User { id, .. } => id,
            Self::Other { instance_id, .. } => instance_id,
        }
    }

    pub fn instance_list_id(&self) -> Option<&Id> {
        match self {
            Self::MailFolder { id, .. } | Self::GroupInfo { id, .. } | Self::Mail { id, .. } => {
                Some(&id.list_id)
            }
            Self::User { .. } => None,
            Self::Other {
                instance_list_id, ..
            } => instance_list_id.as_ref(),
        }
    }
}

impl fmt::Display for EntityUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::MailFolder { .. } => "MailFolder",
            Self::GroupInfo { .. } => "GroupInfo",
            Self::User { .. } => "User",
            Self::Mail { .. } => "Mail",
            Self::Other { type_ref, .. } => type_ref.as_str(),
        };

        match self.instance_list_id() {
            Some(list_id) => write!(
                f,
                "{} {kind} {list_id}/{}",
                self.operation(),
                self.instance_id()
            ),
            None => write!(f, "{} {kind} {}", self.operation(), self.instance_id()),
        }
    }
}
