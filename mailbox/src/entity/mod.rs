//! # Entity module
//!
//! Module dedicated to the remote entities consumed by the mail
//! model. Entities are owned by the remote store: the mail model only
//! reads them through the [`LoadEntity`](crate::backend::LoadEntity)
//! port and never mutates them.
//!
//! The [`update`] module contains the change notifications emitted by
//! the remote store.

mod id;
pub mod update;

#[doc(inline)]
pub use self::{
    id::{Id, IdTuple},
    update::{EntityUpdate, Operation},
};

/// The kind of entity, mostly used for error reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EntityKind {
    MailboxGroupRoot,
    Mailbox,
    GroupInfo,
    Group,
    User,
    MailFolder,
    Mail,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MailboxGroupRoot => "MailboxGroupRoot",
            Self::Mailbox => "MailBox",
            Self::GroupInfo => "GroupInfo",
            Self::Group => "Group",
            Self::User => "User",
            Self::MailFolder => "MailFolder",
            Self::Mail => "Mail",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The type of a group.
///
/// Only [`GroupType::Mail`] groups own a mailbox.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum GroupType {
    User,
    Admin,
    CustomerAdmin,
    Customer,
    #[default]
    Mail,
    Contact,
    File,
    LocalAdmin,
}

impl GroupType {
    pub fn is_mail(&self) -> bool {
        matches!(self, Self::Mail)
    }
}

/// The membership of an identity in a group.
///
/// Memberships of [`GroupType::Mail`] groups are the mailbox group
/// memberships: each one gives access to exactly one mailbox,
/// personal or shared.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub struct GroupMembership {
    /// The id of the group (and of its mailbox group root).
    pub group: Id,

    /// The id of the group info, living in the customer group info
    /// list.
    pub group_info: IdTuple,

    pub group_type: GroupType,
}

impl GroupMembership {
    pub fn new(group: impl Into<Id>, group_info: impl Into<IdTuple>) -> Self {
        Self {
            group: group.into(),
            group_info: group_info.into(),
            group_type: GroupType::Mail,
        }
    }

    pub fn with_group_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }
}

/// The signed-in identity, as stored remotely.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct User {
    pub id: Id,
    pub memberships: Vec<GroupMembership>,
}

impl User {
    /// Iterate over the memberships giving access to a mailbox.
    pub fn mail_group_memberships(&self) -> impl Iterator<Item = &GroupMembership> {
        self.memberships
            .iter()
            .filter(|membership| membership.group_type.is_mail())
    }
}

/// The root entity of a mail group, pointing to its mailbox.
///
/// A mailbox group root shares its id with the mail group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MailboxGroupRoot {
    pub id: Id,
    pub mailbox: Id,
}

/// The reference to the list of system folders of a mailbox.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MailFolderRef {
    /// The list id of the top-level (system) folders.
    pub folders: Id,
}

/// The mailbox entity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mailbox {
    pub id: Id,

    /// The system folders reference.
    ///
    /// It is only absent for mailboxes that are not fully set up
    /// yet, in which case the mailbox cannot be loaded.
    pub system_folders: Option<MailFolderRef>,
}

/// The public information of a group: display name and address.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupInfo {
    pub id: IdTuple,
    pub group: Id,
    pub name: String,
    pub mail_address: Option<String>,
}

/// The group entity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Group {
    pub id: Id,
    pub group_type: GroupType,
    pub group_info: IdTuple,
}
