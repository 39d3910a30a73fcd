//! # Mailbox detail module
//!
//! A [`MailboxDetail`] gathers everything the mail model knows about
//! one mailbox: the mailbox itself, its folder tree and the group
//! owning it. The [`build`] module contains the
//! [`MailboxDetailBuilder`](build::MailboxDetailBuilder).

pub mod build;

use std::ops::Deref;

use tracing::warn;

use crate::{
    entity::{Group, GroupInfo, Id, Mailbox},
    folder::{find_inbox_folder, Folder},
    message::Mail,
    Error, Result,
};

/// The complete view of a mailbox.
///
/// Mailbox details are never mutated: a re-synchronization replaces
/// all of them at once.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MailboxDetail {
    pub mailbox: Mailbox,

    /// The system folders followed by their direct sub-folders.
    pub folders: Vec<Folder>,

    pub mail_group_info: GroupInfo,
    pub mail_group: Group,
}

impl MailboxDetail {
    /// Return `true` if one of the folders contains the given mail
    /// list.
    pub fn contains_mail_list(&self, mail_list_id: &Id) -> bool {
        self.find_folder(mail_list_id).is_some()
    }

    /// Find the folder containing the given mail list.
    pub fn find_folder(&self, mail_list_id: &Id) -> Option<&Folder> {
        self.folders
            .iter()
            .find(|folder| folder.mails == *mail_list_id)
    }

    pub fn inbox(&self) -> Option<&Folder> {
        find_inbox_folder(&self.folders)
    }
}

/// The published collection of mailbox details.
///
/// It holds at most one [`MailboxDetail`] per mail group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MailboxDetails(Vec<MailboxDetail>);

impl MailboxDetails {
    /// Build the collection, keeping only the first detail of each
    /// mail group.
    pub fn new(details: impl IntoIterator<Item = MailboxDetail>) -> Self {
        let mut deduped: Vec<MailboxDetail> = Vec::new();

        for detail in details {
            if deduped
                .iter()
                .any(|d| d.mail_group.id == detail.mail_group.id)
            {
                warn!(group = %detail.mail_group.id, "duplicate mail group, skipping it");
                continue;
            }
            deduped.push(detail);
        }

        Self(deduped)
    }

    /// Find the mailbox detail owning the given mail list.
    pub fn find_by_mail_list_id(&self, mail_list_id: &Id) -> Result<&MailboxDetail> {
        self.iter()
            .find(|detail| detail.contains_mail_list(mail_list_id))
            .ok_or_else(|| Error::FindMailboxDetailsByMailListNotFound(mail_list_id.clone()))
    }

    /// Find the mailbox detail owning the given mail.
    pub fn find_by_mail(&self, mail: &Mail) -> Result<&MailboxDetail> {
        self.find_by_mail_list_id(mail.list_id())
    }

    /// Find the mailbox detail of the given mail group.
    pub fn find_by_mail_group(&self, mail_group_id: &Id) -> Result<&MailboxDetail> {
        self.iter()
            .find(|detail| detail.mail_group.id == *mail_group_id)
            .ok_or_else(|| Error::FindMailboxDetailsByMailGroupNotFound(mail_group_id.clone()))
    }

    /// Find the folder containing the given mail list, among all
    /// mailboxes.
    pub fn find_folder(&self, mail_list_id: &Id) -> Option<&Folder> {
        self.iter()
            .find_map(|detail| detail.find_folder(mail_list_id))
    }

    /// Collect the mail list ids of all the inbox folders.
    pub fn inbox_list_ids(&self) -> Vec<Id> {
        self.iter()
            .filter_map(MailboxDetail::inbox)
            .map(|inbox| inbox.mails.clone())
            .collect()
    }
}

impl Deref for MailboxDetails {
    type Target = Vec<MailboxDetail>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<MailboxDetail> for MailboxDetails {
    fn from_iter<T: IntoIterator<Item = MailboxDetail>>(iter: T) -> Self {
        Self::new(iter)
    }
}
