//! # Mail model module
//!
//! The [`MailModel`] keeps a reconciled view of the mailboxes of the
//! signed-in identity: one [`MailboxDetail`] per mail group
//! membership. The view is built by [`MailModel::init`], read through
//! synchronous lookups and kept up-to-date by
//! [`MailModel::on_events`], see the [`sync`] module.
//!
//! Use the [`MailModelBuilder`] to build a model.

pub mod sync;

use std::{
    fmt, result,
    sync::{Arc, Mutex, RwLock, Weak},
};

use futures::{
    future::{try_join_all, BoxFuture, Shared},
    FutureExt,
};
use tracing::{debug, info, warn};

use crate::{
    backend::{LoadEntity, Method, SendCommand, Service, Session},
    config::MailModelConfig,
    detail::{build::MailboxDetailBuilder, MailboxDetail, MailboxDetails},
    entity::{Id, IdTuple},
    folder::{load::FolderTreeLoader, Folder},
    message::{Mail, Payload},
    notify::Notify,
    AnyResult, Error, Result,
};

/// The mail model event.
///
/// Enumeration of all the events the host is notified about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MailModelEvent {
    /// Mailbox details have been rebuilt following remote changes:
    /// views built on top of them should be refreshed.
    Refreshed,

    /// A move or a delete was refused because another operation is
    /// still active on the same mails. The user should be told to try
    /// again later.
    OperationStillActive,

    /// The user activated the notification of the given new mail.
    MailActivated(IdTuple),
}

/// The mail model event handler alias.
pub type MailModelEventHandler = Arc<dyn Fn(MailModelEvent) -> AnyResult<()> + Send + Sync>;

type SharedInit = Shared<BoxFuture<'static, result::Result<(), Arc<Error>>>>;

/// The state of the mailbox details initialization.
#[derive(Default)]
struct Initialization {
    /// Incremented every time a new build starts.
    generation: u64,

    /// The running build, or the last one that succeeded. `None`
    /// means the next call to init starts a new build.
    current: Option<SharedInit>,

    /// The build invalidated while it was the current one. The next
    /// build waits for it before running.
    superseded: Option<SharedInit>,
}

/// The mail model.
///
/// Cloning the model is cheap: all clones share the same state.
#[derive(Clone)]
pub struct MailModel {
    config: Arc<MailModelConfig>,
    session: Arc<dyn Session>,
    entities: Arc<dyn LoadEntity>,
    commands: Arc<dyn SendCommand>,
    notifier: Option<Arc<dyn Notify>>,
    handler: MailModelEventHandler,
    builder: MailboxDetailBuilder,
    details: Arc<RwLock<Arc<MailboxDetails>>>,
    initialization: Arc<Mutex<Initialization>>,
}

impl MailModel {
    /// Build the mailbox details of every mail group membership of
    /// the signed-in identity, then publish them.
    ///
    /// Concurrent calls share the same build. Once a build succeeded,
    /// subsequent calls resolve immediately until the model is
    /// [invalidated](MailModel::invalidate). A failed build is
    /// forgotten, so the next call starts a new one, and the details
    /// published previously stay untouched.
    pub async fn init(&self) -> Result<()> {
        let init = self.initialization()?;
        init.await.map_err(Error::InitMailboxDetailsError)
    }

    /// Forget the current build, so the next call to
    /// [`MailModel::init`] rebuilds the mailbox details.
    ///
    /// A build still running is not cancelled: the next build waits
    /// for it to finish, then publishes on top of it.
    pub fn invalidate(&self) -> Result<()> {
        let mut state = self
            .initialization
            .lock()
            .map_err(|_| Error::LockPoisonedError)?;

        if let Some(current) = state.current.take() {
            debug!(generation = state.generation, "invalidating mailbox details");
            state.superseded = Some(current);
        }

        Ok(())
    }

    fn initialization(&self) -> Result<SharedInit> {
        let mut state = self
            .initialization
            .lock()
            .map_err(|_| Error::LockPoisonedError)?;

        if let Some(init) = state.current.as_ref() {
            return Ok(init.clone());
        }

        state.generation += 1;

        let init = MailboxDetailsInit {
            generation: state.generation,
            superseded: state.superseded.take(),
            session: self.session.clone(),
            builder: self.builder.clone(),
            details: self.details.clone(),
            initialization: Arc::downgrade(&self.initialization),
        };

        let init = async move { init.run().await.map_err(Arc::new) }
            .boxed()
            .shared();

        state.current = Some(init.clone());

        Ok(init)
    }

    /// Return the last published mailbox details.
    ///
    /// The returned snapshot is never partially built and is not
    /// affected by later publications.
    pub fn mailbox_details(&self) -> Arc<MailboxDetails> {
        match self.details.read() {
            Ok(details) => details.clone(),
            Err(err) => err.into_inner().clone(),
        }
    }

    /// Find the mailbox details owning the given mail list.
    pub fn find_mailbox_details_by_mail_list_id(&self, mail_list_id: &Id) -> Result<MailboxDetail> {
        self.mailbox_details()
            .find_by_mail_list_id(mail_list_id)
            .cloned()
    }

    /// Find the mailbox details owning the given mail.
    pub fn find_mailbox_details_by_mail(&self, mail: &Mail) -> Result<MailboxDetail> {
        self.find_mailbox_details_by_mail_list_id(mail.list_id())
    }

    /// Find the mailbox details of the given mail group.
    pub fn find_mailbox_details_by_mail_group(&self, mail_group_id: &Id) -> Result<MailboxDetail> {
        self.mailbox_details()
            .find_by_mail_group(mail_group_id)
            .cloned()
    }

    /// Find the mailbox details of the user's own mail group.
    pub fn find_user_mailbox_details(&self) -> Result<MailboxDetail> {
        let membership = self
            .session
            .user_mail_group_membership()
            .ok_or(Error::FindUserMailGroupMembershipNotFound)?;

        self.mailbox_details()
            .find_by_mail_group(&membership.group)
            .cloned()
            .map_err(|_| Error::FindUserMailboxDetailsNotFound(membership.group))
    }

    /// Find the folders of the mailbox owning the given mail.
    pub fn find_mailbox_folders_by_mail(&self, mail: &Mail) -> Result<Vec<Folder>> {
        Ok(self.find_mailbox_details_by_mail(mail)?.folders)
    }

    /// Find the folder containing the given mail list.
    ///
    /// Unlike other lookups, a miss is not an error.
    pub fn find_folder(&self, mail_list_id: &Id) -> Option<Folder> {
        self.mailbox_details().find_folder(mail_list_id).cloned()
    }

    /// Collect the mail list ids of all the inbox folders.
    pub fn inbox_list_ids(&self) -> Vec<Id> {
        self.mailbox_details().inbox_list_ids()
    }

    /// Return the configuration the model was built with.
    pub fn config(&self) -> &MailModelConfig {
        &self.config
    }

    /// Send the given command. A command refused because another
    /// operation is still active is reported to the host and treated
    /// as a success.
    pub(crate) async fn send_command_or_notify(
        &self,
        service: Service,
        method: Method,
        payload: Payload,
    ) -> Result<()> {
        match self.commands.send_command(service, method, payload).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_precondition_failed() => {
                info!(%service, %method, "{err}");
                self.fire_event(MailModelEvent::OperationStillActive);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub(crate) fn fire_event(&self, event: MailModelEvent) {
        debug!("firing event {event:?}");
        if let Err(err) = (self.handler)(event.clone()) {
            warn!("cannot fire event {event:?}, skipping it");
            debug!("{err:?}");
        }
    }
}

impl fmt::Debug for MailModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailModel")
            .field("config", &self.config)
            .field("details", &self.mailbox_details())
            .finish_non_exhaustive()
    }
}

/// A single build of the mailbox details.
struct MailboxDetailsInit {
    generation: u64,
    superseded: Option<SharedInit>,
    session: Arc<dyn Session>,
    builder: MailboxDetailBuilder,
    details: Arc<RwLock<Arc<MailboxDetails>>>,
    initialization: Weak<Mutex<Initialization>>,
}

impl MailboxDetailsInit {
    async fn run(self) -> Result<()> {
        let generation = self.generation;

        if let Some(superseded) = self.superseded.clone() {
            debug!(generation, "waiting for superseded mailbox details build");
            if let Err(err) = superseded.await {
                debug!(generation, "superseded build failed: {err}");
            }
        }

        let res = self.build_and_publish().await;

        if let Err(err) = &res {
            warn!(generation, "cannot init mailbox details: {err}");
            self.forget();
        }

        res
    }

    async fn build_and_publish(&self) -> Result<()> {
        let generation = self.generation;
        let memberships = self.session.mail_group_memberships();

        debug!(
            generation,
            memberships = memberships.len(),
            "building mailbox details"
        );

        let details = try_join_all(
            memberships
                .iter()
                .map(|membership| self.builder.build(membership)),
        )
        .await?;

        let details = Arc::new(MailboxDetails::new(details));

        *self
            .details
            .write()
            .map_err(|_| Error::LockPoisonedError)? = details.clone();

        debug!(
            generation,
            mailboxes = details.len(),
            "mailbox details published"
        );

        Ok(())
    }

    /// Clear the current build if it is still this one, so that the
    /// next call to init retries.
    fn forget(&self) {
        let Some(initialization) = self.initialization.upgrade() else {
            return;
        };

        match initialization.lock() {
            Ok(mut state) if state.generation == self.generation => {
                state.current = None;
            }
            Ok(_) => {
                debug!(generation = self.generation, "build already superseded");
            }
            Err(err) => {
                warn!("cannot forget failed build: {err}");
            }
        };
    }
}

/// Convenient builder that helps you to build a [`MailModel`].
pub struct MailModelBuilder {
    config: MailModelConfig,
    session: Arc<dyn Session>,
    entities: Arc<dyn LoadEntity>,
    commands: Arc<dyn SendCommand>,
    notifier: Option<Arc<dyn Notify>>,
    handler: MailModelEventHandler,
}

impl MailModelBuilder {
    pub fn new(
        session: Arc<dyn Session>,
        entities: Arc<dyn LoadEntity>,
        commands: Arc<dyn SendCommand>,
    ) -> Self {
        #[cfg(feature = "notify")]
        let notifier: Option<Arc<dyn Notify>> = Some(Arc::new(crate::notify::SystemNotify));
        #[cfg(not(feature = "notify"))]
        let notifier: Option<Arc<dyn Notify>> = None;

        Self {
            config: MailModelConfig::default(),
            session,
            entities,
            commands,
            notifier,
            handler: Arc::new(|_| Ok(())),
        }
    }

    pub fn with_config(mut self, config: MailModelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notify + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn without_notifier(mut self) -> Self {
        self.notifier = None;
        self
    }

    pub fn with_handler<H>(mut self, handler: H) -> Self
    where
        H: Fn(MailModelEvent) -> AnyResult<()> + Send + Sync + 'static,
    {
        self.handler = Arc::new(handler);
        self
    }

    pub fn build(self) -> MailModel {
        let folders = FolderTreeLoader::new(self.entities.clone(), self.session.clone());
        let builder = MailboxDetailBuilder::new(self.entities.clone(), folders)
            .with_sub_folders(self.config.include_sub_folders);

        MailModel {
            config: Arc::new(self.config),
            session: self.session,
            entities: self.entities,
            commands: self.commands,
            notifier: self.notifier,
            handler: self.handler,
            builder,
            details: Default::default(),
            initialization: Default::default(),
        }
    }
}
