//! Module dedicated to mail model synchronization.
//!
//! The remote store notifies changes by batches of
//! [`EntityUpdate`]s. A batch is first classified into a
//! [`SyncPlan`], then the plan is applied by
//! [`MailModel::on_events`].

use std::collections::HashSet;

use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::{
    entity::{EntityUpdate, Id, IdTuple},
    Result,
};

use super::{MailModel, MailModelEvent};

/// What a batch of updates requires from the mail model.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncPlan {
    /// The mailbox details must be rebuilt.
    pub rebuild: bool,

    /// The signed-in user changed: its mail group memberships must
    /// be compared with the published mailbox details.
    pub check_user: Option<Id>,

    /// New mails that arrived in an inbox.
    pub new_mails: Vec<IdTuple>,
}

impl SyncPlan {
    /// Classify the given batch of updates.
    ///
    /// Folder changes and group info updates always require a
    /// rebuild. Updates of the signed-in user require a membership
    /// check. Mails created in one of the given inboxes are new mails,
    /// unless the same batch contains another operation on the same
    /// mail (for example a create followed by a move).
    pub fn new(updates: &[EntityUpdate], user_id: &Id, inbox_list_ids: &[Id]) -> Self {
        let mut plan = Self::default();

        for update in updates {
            match update {
                EntityUpdate::MailFolder { .. } => {
                    debug!(%update, "mail folder changed, rebuild required");
                    plan.rebuild = true;
                }
                EntityUpdate::GroupInfo { operation, .. } if operation.is_update() => {
                    debug!(%update, "group info updated, rebuild required");
                    plan.rebuild = true;
                }
                EntityUpdate::User { operation, id } if operation.is_update() && id == user_id => {
                    debug!(%update, "user updated, membership check required");
                    plan.check_user = Some(id.clone());
                }
                EntityUpdate::Mail { operation, id } if operation.is_create() => {
                    if !inbox_list_ids.contains(&id.list_id) {
                        continue;
                    }

                    let superseded = updates.iter().any(|other| match other {
                        EntityUpdate::Mail {
                            operation,
                            id: other_id,
                        } => other_id.element_id == id.element_id && !operation.is_create(),
                        _ => false,
                    });

                    if superseded {
                        debug!(%update, "new mail superseded in the same batch, skipping it");
                    } else if !plan.new_mails.contains(id) {
                        plan.new_mails.push(id.clone());
                    }
                }
                EntityUpdate::GroupInfo { .. }
                | EntityUpdate::User { .. }
                | EntityUpdate::Mail { .. }
                | EntityUpdate::Other { .. } => {
                    trace!(%update, "irrelevant update, skipping it");
                }
            }
        }

        plan
    }
}

impl MailModel {
    /// Process the given batch of remote updates.
    ///
    /// The function does not wait for the reconciliation: the
    /// mailbox details are rebuilt in a background task, at most once
    /// per batch, and the host is notified with
    /// [`MailModelEvent::Refreshed`] once they are published. Failures
    /// of the background task are only logged.
    ///
    /// Batches received before the previous rebuild started share
    /// the same build, but each of them fires its own
    /// [`MailModelEvent::Refreshed`].
    ///
    /// Rebuilds read the memberships from the
    /// [`Session`](crate::backend::Session): the host must update the
    /// session before delivering a batch that changes the user.
    ///
    /// The returned handle can be awaited to wait for the
    /// reconciliation to finish. It must be called from within a
    /// tokio runtime.
    pub fn on_events(&self, updates: &[EntityUpdate]) -> Option<JoinHandle<()>> {
        let plan = SyncPlan::new(updates, &self.session.user_id(), &self.inbox_list_ids());
        trace!("sync plan: {plan:#?}");

        for id in &plan.new_mails {
            self.notify_new_mail(id);
        }

        if plan.rebuild {
            if let Err(err) = self.invalidate() {
                warn!("cannot invalidate mailbox details: {err}");
                return None;
            }

            let model = self.clone();
            return Some(tokio::spawn(async move {
                model.refresh().await;
            }));
        }

        if let Some(user_id) = plan.check_user {
            let model = self.clone();
            return Some(tokio::spawn(async move {
                match model.memberships_changed(&user_id).await {
                    Ok(false) => {
                        debug!("mail group memberships count unchanged, skipping rebuild");
                    }
                    Ok(true) => match model.invalidate() {
                        Ok(()) => model.refresh().await,
                        Err(err) => warn!("cannot invalidate mailbox details: {err}"),
                    },
                    Err(err) => {
                        warn!("cannot check mail group memberships of user {user_id}: {err}");
                    }
                }
            }));
        }

        None
    }

    /// Compare the number of distinct mail groups the given user is
    /// member of with the number of published mailbox details.
    ///
    /// Only counts are compared: a membership swapped for another
    /// one is not detected. The fetched user is only used for
    /// counting.
    async fn memberships_changed(&self, user_id: &Id) -> Result<bool> {
        let user = self.entities.load_user(user_id).await?;
        let memberships = user
            .mail_group_memberships()
            .map(|membership| &membership.group)
            .collect::<HashSet<_>>()
            .len();
        let details = self.mailbox_details().len();

        let session = self
            .session
            .mail_group_memberships()
            .into_iter()
            .map(|membership| membership.group)
            .collect::<HashSet<_>>()
            .len();

        if session != memberships {
            warn!(memberships, session, "session lags behind remote user memberships");
        }

        debug!(memberships, details, "comparing mail group memberships");

        Ok(memberships != details)
    }

    async fn refresh(&self) {
        match self.init().await {
            Ok(()) => self.fire_event(MailModelEvent::Refreshed),
            Err(err) => {
                warn!("cannot refresh mailbox details: {err}");
                debug!("{err:?}");
            }
        }
    }

    fn notify_new_mail(&self, id: &IdTuple) {
        let Some(config) = self.config.notify.as_ref() else {
            debug!(%id, "new mail notifications disabled, skipping");
            return;
        };

        let Some(notifier) = self.notifier.as_ref() else {
            debug!(%id, "no notifier available, skipping");
            return;
        };

        debug!(%id, "notifying new mail");

        let model = self.clone();
        let activated = id.clone();
        let on_activate = Box::new(move || {
            model.fire_event(MailModelEvent::MailActivated(activated));
        });

        let body = config.render_body(id);
        if let Err(err) = notifier.notify(&config.summary, &body, on_activate) {
            warn!(%id, "cannot notify new mail: {err}");
            debug!("{err:?}");
        }
    }
}
