//! # Message module
//!
//! Module dedicated to mails and to the commands that alter their
//! location: [`move_`] and [`delete`].

pub mod delete;
pub mod move_;

use crate::entity::{Id, IdTuple};

/// The mail structure.
///
/// Mails are not owned by the mail model, they are only referenced
/// by id. The folder of a mail is the folder whose mails list id
/// matches the list id of the mail.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Mail {
    pub id: IdTuple,

    /// The id of the mail group owning the mail.
    pub owner_group: Id,
}

impl Mail {
    pub fn new(id: impl Into<IdTuple>, owner_group: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            owner_group: owner_group.into(),
        }
    }

    /// The id of the mail list containing this mail.
    pub fn list_id(&self) -> &Id {
        &self.id.list_id
    }
}

/// The payload of a move command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MoveMailData {
    pub target_folder: IdTuple,
    pub mails: Vec<IdTuple>,
}

/// The payload of a final delete command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DeleteMailData {
    pub mails: Vec<IdTuple>,
}

/// The payload sent through the
/// [`SendCommand`](crate::backend::SendCommand) port.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Payload {
    MoveMail(MoveMailData),
    DeleteMail(DeleteMailData),
}

impl From<MoveMailData> for Payload {
    fn from(data: MoveMailData) -> Self {
        Self::MoveMail(data)
    }
}

impl From<DeleteMailData> for Payload {
    fn from(data: DeleteMailData) -> Self {
        Self::DeleteMail(data)
    }
}
