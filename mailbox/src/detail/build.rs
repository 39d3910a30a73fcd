//! Module dedicated to mailbox details building.
//!
//! The core structure of this module is the
//! [`MailboxDetailBuilder`].

use std::sync::Arc;

use futures::try_join;
use tracing::debug;

use crate::{
    backend::LoadEntity,
    entity::GroupMembership,
    folder::load::FolderTreeLoader,
    Error, Result,
};

use super::MailboxDetail;

/// The mailbox detail builder.
///
/// Loads everything needed to materialize the [`MailboxDetail`] of
/// one mail group membership.
#[derive(Clone)]
pub struct MailboxDetailBuilder {
    entities: Arc<dyn LoadEntity>,
    folders: FolderTreeLoader,
    include_sub_folders: bool,
}

impl MailboxDetailBuilder {
    pub fn new(entities: Arc<dyn LoadEntity>, folders: FolderTreeLoader) -> Self {
        Self {
            entities,
            folders,
            include_sub_folders: true,
        }
    }

    pub fn with_sub_folders(mut self, include_sub_folders: bool) -> Self {
        self.include_sub_folders = include_sub_folders;
        self
    }

    /// Build the mailbox detail of the given membership.
    ///
    /// The mailbox (reached through the mailbox group root), the
    /// group info and the group are loaded concurrently, then the
    /// folder tree of the mailbox is loaded. Any failure aborts the
    /// whole build.
    pub async fn build(&self, membership: &GroupMembership) -> Result<MailboxDetail> {
        debug!(group = %membership.group, "building mailbox detail");

        let mailbox = async {
            let root = self
                .entities
                .load_mailbox_group_root(&membership.group)
                .await?;
            self.entities.load_mailbox(&root.mailbox).await
        };

        let (mailbox, mail_group_info, mail_group) = try_join!(
            mailbox,
            self.entities.load_group_info(&membership.group_info),
            self.entities.load_group(&membership.group),
        )?;

        let folders_list_id = match mailbox.system_folders.as_ref() {
            Some(system_folders) => system_folders.folders.clone(),
            None => return Err(Error::MissingSystemFoldersError(mailbox.id.clone())),
        };

        let folders = self
            .folders
            .load_folders(&folders_list_id, self.include_sub_folders)
            .await?;

        debug!(
            group = %membership.group,
            folders = folders.len(),
            "mailbox detail built"
        );

        Ok(MailboxDetail {
            mailbox,
            folders,
            mail_group_info,
            mail_group,
        })
    }
}
