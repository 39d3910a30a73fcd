//! # Folder module
//!
//! Module dedicated to folder (as known as mail folder) management.
//!
//! The main entities are [`FolderKind`] and [`Folder`]. Folders form
//! a two-level tree: the system folders of a mailbox, and their
//! direct sub-folders. The [`load`] module contains the
//! [`FolderTreeLoader`](load::FolderTreeLoader) that materializes
//! this tree.

pub mod load;

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::entity::{Id, IdTuple};

pub const CUSTOM: &str = "Custom";
pub const INBOX: &str = "Inbox";
pub const SENT: &str = "Sent";
pub const TRASH: &str = "Trash";
pub const ARCHIVE: &str = "Archive";
pub const SPAM: &str = "Spam";
pub const DRAFT: &str = "Draft";
pub const DRAFTS: &str = "Drafts";

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse folder kind {0}")]
    ParseFolderKindError(String),
}

/// The folder kind enumeration.
///
/// Every system folder has a dedicated kind. Folders created by the
/// user are [`FolderKind::Custom`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum FolderKind {
    /// The kind of folder created by the user.
    #[default]
    Custom,

    /// The kind of folder that contains received emails.
    ///
    /// New mails created in this folder trigger a notification.
    Inbox,

    /// The kind of folder that contains sent emails.
    Sent,

    /// The kind of folder that contains trashed emails.
    ///
    /// Deleting a mail from this folder deletes it for good.
    Trash,

    /// The kind of folder that contains archived emails.
    ///
    /// Only available for internal accounts.
    Archive,

    /// The kind of folder that contains spam.
    ///
    /// Only available for internal accounts that are allowed to
    /// communicate outside their organization. Deleting a mail from
    /// this folder deletes it for good.
    Spam,

    /// The kind of folder than contains not finished emails.
    Draft,
}

impl FolderKind {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self, Self::Inbox)
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    pub fn is_trash(&self) -> bool {
        matches!(self, Self::Trash)
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive)
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Self::Spam)
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Return the numeric code used by the remote store.
    pub fn code(&self) -> u8 {
        match self {
            Self::Custom => 0,
            Self::Inbox => 1,
            Self::Sent => 2,
            Self::Trash => 3,
            Self::Archive => 4,
            Self::Spam => 5,
            Self::Draft => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => CUSTOM,
            Self::Inbox => INBOX,
            Self::Sent => SENT,
            Self::Trash => TRASH,
            Self::Archive => ARCHIVE,
            Self::Spam => SPAM,
            Self::Draft => DRAFT,
        }
    }
}

impl TryFrom<u8> for FolderKind {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Custom),
            1 => Ok(Self::Inbox),
            2 => Ok(Self::Sent),
            3 => Ok(Self::Trash),
            4 => Ok(Self::Archive),
            5 => Ok(Self::Spam),
            6 => Ok(Self::Draft),
            code => Err(Error::ParseFolderKindError(code.to_string())),
        }
    }
}

impl FromStr for FolderKind {
    type Err = Error;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            kind if kind.eq_ignore_ascii_case(CUSTOM) => Ok(Self::Custom),
            kind if kind.eq_ignore_ascii_case(INBOX) => Ok(Self::Inbox),
            kind if kind.eq_ignore_ascii_case(SENT) => Ok(Self::Sent),
            kind if kind.eq_ignore_ascii_case(TRASH) => Ok(Self::Trash),
            kind if kind.eq_ignore_ascii_case(ARCHIVE) => Ok(Self::Archive),
            kind if kind.eq_ignore_ascii_case(SPAM) => Ok(Self::Spam),
            kind if kind.eq_ignore_ascii_case(DRAFT) => Ok(Self::Draft),
            kind if kind.eq_ignore_ascii_case(DRAFTS) => Ok(Self::Draft),
            kind => match kind.parse::<u8>() {
                Ok(code) => Self::try_from(code),
                Err(_) => Err(Error::ParseFolderKindError(kind.to_owned())),
            },
        }
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The folder structure.
///
/// A folder does not contain mails directly: it references the list
/// of its mails. A mail belongs to the folder whose `mails` list id
/// matches the mail list id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Folder {
    pub id: IdTuple,
    pub kind: FolderKind,

    /// The folder name, only relevant for custom folders.
    pub name: String,

    /// The list id of the mails contained in this folder.
    pub mails: Id,

    /// The list id of the direct sub-folders of this folder.
    pub sub_folders: Id,

    /// The id of the mail group owning the folder.
    pub owner_group: Id,
}

impl Folder {
    pub fn is_inbox(&self) -> bool {
        self.kind.is_inbox()
    }

    pub fn is_trash(&self) -> bool {
        self.kind.is_trash()
    }

    pub fn is_spam(&self) -> bool {
        self.kind.is_spam()
    }

    /// Return `true` if mails deleted from this folder are deleted
    /// for good instead of being moved to the trash folder.
    pub fn is_final_delete(&self) -> bool {
        self.kind.is_trash() || self.kind.is_spam()
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.kind.is_custom() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Find the trash folder among the given folders.
pub fn find_trash_folder<'a>(folders: impl IntoIterator<Item = &'a Folder>) -> Option<&'a Folder> {
    folders.into_iter().find(|folder| folder.is_trash())
}

/// Find the inbox folder among the given folders.
pub fn find_inbox_folder<'a>(folders: impl IntoIterator<Item = &'a Folder>) -> Option<&'a Folder> {
    folders.into_iter().find(|folder| folder.is_inbox())
}
