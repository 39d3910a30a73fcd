//! Module dedicated to mails moving.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    backend::{Method, Service},
    folder::Folder,
    model::MailModel,
    Result,
};

use super::{Mail, MoveMailData};

#[async_trait]
pub trait MoveMails: Send + Sync {
    /// Move the given mails to the given target folder.
    ///
    /// Mails already located in the target folder and mails owned by
    /// another mail group than the target folder are skipped: mails
    /// never move across mailboxes.
    async fn move_mails(&self, mails: &[Mail], target: &Folder) -> Result<()>;
}

/// Keep the mails that can actually be moved to the given target
/// folder.
pub fn filter_movable_mails<'a>(mails: &'a [Mail], target: &Folder) -> Vec<&'a Mail> {
    mails
        .iter()
        .filter(|mail| *mail.list_id() != target.mails && mail.owner_group == target.owner_group)
        .collect()
}

#[async_trait]
impl MoveMails for MailModel {
    async fn move_mails(&self, mails: &[Mail], target: &Folder) -> Result<()> {
        let mails = filter_movable_mails(mails, target);

        if mails.is_empty() {
            debug!(target = %target.id, "no mail to move, skipping");
            return Ok(());
        }

        debug!(target = %target.id, count = mails.len(), "moving mails");

        let data = MoveMailData {
            target_folder: target.id.clone(),
            mails: mails.into_iter().map(|mail| mail.id.clone()).collect(),
        };

        self.send_command_or_notify(Service::MoveMailService, Method::Post, data.into())
            .await
    }
}
