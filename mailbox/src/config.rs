//! Module dedicated to the mail model configuration.
//!
//! This module contains the representation of the mail model
//! configuration named [`MailModelConfig`].

use crate::entity::IdTuple;

pub const DEFAULT_NEW_MAIL_SUMMARY: &str = "New emails";
pub const DEFAULT_NEW_MAIL_BODY: &str = "";

/// The mail model configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", deny_unknown_fields, default)
)]
pub struct MailModelConfig {
    /// The new mail notification configuration.
    ///
    /// New mails arriving in an inbox trigger a notification, unless
    /// this option is unset.
    pub notify: Option<NewMailNotifyConfig>,

    /// Load the direct sub-folders of the system folders.
    ///
    /// Defaults to `true`. Folders deeper than one level below the
    /// system folders are never loaded.
    pub include_sub_folders: bool,
}

impl Default for MailModelConfig {
    fn default() -> Self {
        Self {
            notify: Some(NewMailNotifyConfig::default()),
            include_sub_folders: true,
        }
    }
}

/// The new mail notification configuration.
///
/// The structure tries to match the [`notify_rust::Notification`]
/// API.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case", deny_unknown_fields, default)
)]
pub struct NewMailNotifyConfig {
    /// The summary (or the title) of the notification.
    pub summary: String,

    /// The body of the notification.
    ///
    /// Accepted placeholders:
    ///  - "{id}": the element id of the new mail
    ///  - "{list-id}": the list id of the new mail
    pub body: String,
}

impl Default for NewMailNotifyConfig {
    fn default() -> Self {
        Self {
            summary: DEFAULT_NEW_MAIL_SUMMARY.to_owned(),
            body: DEFAULT_NEW_MAIL_BODY.to_owned(),
        }
    }
}

impl NewMailNotifyConfig {
    /// Render the body, replacing placeholders with the given mail
    /// id.
    pub fn render_body(&self, id: &IdTuple) -> String {
        self.body
            .replace("{id}", &id.element_id)
            .replace("{list-id}", &id.list_id)
    }
}
