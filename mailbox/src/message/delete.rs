//! Module dedicated to mails deletion.

use async_trait::async_trait;
use futures::{future::BoxFuture, FutureExt};
use tracing::debug;

use crate::{
    backend::{Method, Service},
    entity::Id,
    folder::{find_trash_folder, Folder},
    model::MailModel,
    Error, Result,
};

use super::{move_::MoveMails, DeleteMailData, Mail};

#[async_trait]
pub trait DeleteMails: Send + Sync {
    /// Delete the given mails.
    ///
    /// Mails located in the trash or in the spam folder are deleted
    /// for good, all the other ones are moved to the trash folder of
    /// their mailbox. The user is expected to have confirmed the
    /// deletion beforehand.
    async fn delete_mails(&self, mails: &[Mail]) -> Result<()>;
}

/// The mails to delete, grouped by deletion strategy.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeletePartition {
    /// Mails to delete for good.
    pub trash: Vec<Mail>,

    /// Mails to move to the trash folder.
    pub move_: Vec<Mail>,
}

/// Group the given mails by deletion strategy.
///
/// The folder of each mail is resolved with the given function. A
/// mail whose folder is unknown is moved to the trash.
pub fn partition_mails<'a, F>(mails: &[Mail], find_folder: F) -> DeletePartition
where
    F: Fn(&Id) -> Option<&'a Folder>,
{
    mails
        .iter()
        .fold(DeletePartition::default(), |mut partition, mail| {
            let is_final_delete = find_folder(mail.list_id())
                .map(Folder::is_final_delete)
                .unwrap_or_default();

            if is_final_delete {
                partition.trash.push(mail.clone());
            } else {
                partition.move_.push(mail.clone());
            }

            partition
        })
}

#[async_trait]
impl DeleteMails for MailModel {
    async fn delete_mails(&self, mails: &[Mail]) -> Result<()> {
        let details = self.mailbox_details();
        let partition = partition_mails(mails, |list_id| details.find_folder(list_id));

        debug!(
            trash = partition.trash.len(),
            move_ = partition.move_.len(),
            "deleting mails"
        );

        let mut tasks: Vec<BoxFuture<'_, Result<()>>> = Vec::with_capacity(2);

        if !partition.trash.is_empty() {
            let data = DeleteMailData {
                mails: partition.trash.iter().map(|mail| mail.id.clone()).collect(),
            };

            tasks.push(
                self.send_command_or_notify(Service::MailService, Method::Delete, data.into())
                    .boxed(),
            );
        }

        if let Some(first) = partition.move_.first() {
            let detail = details.find_by_mail(first)?;
            let trash = find_trash_folder(&detail.folders)
                .cloned()
                .ok_or_else(|| Error::FindTrashFolderNotFound(detail.mailbox.id.clone()))?;

            let mails = partition.move_;
            tasks.push(async move { self.move_mails(&mails, &trash).await }.boxed());
        }

        futures::future::try_join_all(tasks).await?;

        Ok(())
    }
}
