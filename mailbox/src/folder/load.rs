//! Module dedicated to folder tree loading.
//!
//! The core structure of this module is the [`FolderTreeLoader`].

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, trace};

use crate::{
    backend::{Feature, LoadEntity, Result, Session},
    entity::Id,
};

use super::Folder;

/// The folder tree loader.
///
/// Loads the folders of a folder list and, optionally, the direct
/// sub-folders of each one of them. The tree is never deeper than two
/// levels: sub-folders of sub-folders are not loaded.
#[derive(Clone)]
pub struct FolderTreeLoader {
    entities: Arc<dyn LoadEntity>,
    session: Arc<dyn Session>,
}

impl FolderTreeLoader {
    pub fn new(entities: Arc<dyn LoadEntity>, session: Arc<dyn Session>) -> Self {
        Self { entities, session }
    }

    /// Load the folders of the given list.
    ///
    /// When `include_sub_folders` is `true`, the direct children of
    /// every loaded folder are appended after their parents, in the
    /// order of their parents. Folders hidden to the current account
    /// are then filtered out.
    pub async fn load_folders(&self, list_id: &Id, include_sub_folders: bool) -> Result<Vec<Folder>> {
        debug!(%list_id, include_sub_folders, "loading folders");

        let mut folders = self.entities.load_all_folders(list_id).await?;

        if include_sub_folders {
            let sub_folders = try_join_all(
                folders
                    .iter()
                    .map(|folder| self.entities.load_all_folders(&folder.sub_folders)),
            )
            .await?;

            folders.extend(sub_folders.into_iter().flatten());
        }

        let folders = filter_visible_folders(
            folders,
            self.session.is_internal_user(),
            self.session.is_enabled(Feature::InternalCommunication),
        );

        trace!(%list_id, "loaded folders: {folders:#?}");

        Ok(folders)
    }
}

/// Filter out folders the account should not see.
///
/// Spam and archive folders are only available to internal accounts,
/// and spam folders are hidden as soon as the account is restricted
/// to internal communication.
pub fn filter_visible_folders(
    folders: impl IntoIterator<Item = Folder>,
    is_internal_user: bool,
    internal_communication: bool,
) -> Vec<Folder> {
    folders
        .into_iter()
        .filter(|folder| {
            if (folder.kind.is_spam() || folder.kind.is_archive()) && !is_internal_user {
                false
            } else {
                !(internal_communication && folder.kind.is_spam())
            }
        })
        .collect()
}
