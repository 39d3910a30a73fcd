#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use mailbox::{
    backend::{self, Feature, LoadEntity, Method, SendCommand, Service, Session},
    entity::{
        EntityKind, Group, GroupInfo, GroupMembership, Id, IdTuple, MailFolderRef, Mailbox,
        MailboxGroupRoot, User,
    },
    folder::{Folder, FolderKind},
    message::Payload,
    notify::{ActivateFn, Notify},
    AnyResult, MailModel, MailModelBuilder, MailModelEvent,
};
use tokio::sync::Semaphore;

/// In-memory remote entity store.
#[derive(Default)]
pub struct Remote {
    pub roots: Mutex<HashMap<Id, MailboxGroupRoot>>,
    pub mailboxes: Mutex<HashMap<Id, Mailbox>>,
    pub group_infos: Mutex<HashMap<IdTuple, GroupInfo>>,
    pub groups: Mutex<HashMap<Id, Group>>,
    pub users: Mutex<HashMap<Id, User>>,
    pub folders: Mutex<HashMap<Id, Vec<Folder>>>,

    /// Number of folder lists loaded, all builds included.
    pub folder_loads: AtomicUsize,

    /// Number of mailbox group roots loaded, one per membership and
    /// per build.
    pub root_loads: AtomicUsize,

    /// Makes every folder list load fail with a transport error.
    pub offline: AtomicBool,

    /// When set, folder list loads read their folders, then wait for
    /// the gate to be opened before returning them.
    pub gate: Mutex<Option<Arc<Semaphore>>>,
}

impl Remote {
    /// Add a mail group with its mailbox, and return its membership.
    pub fn add_mail_group(&self, group: &str, folders: Vec<Folder>) -> GroupMembership {
        let mailbox_id = Id::from(format!("mailbox-{group}"));
        let folders_list_id = Id::from(format!("folders-{group}"));
        let group_info_id = IdTuple::new("group-infos", format!("info-{group}"));

        self.roots.lock().unwrap().insert(
            group.into(),
            MailboxGroupRoot {
                id: group.into(),
                mailbox: mailbox_id.clone(),
            },
        );

        self.mailboxes.lock().unwrap().insert(
            mailbox_id.clone(),
            Mailbox {
                id: mailbox_id,
                system_folders: Some(MailFolderRef {
                    folders: folders_list_id.clone(),
                }),
            },
        );

        self.group_infos.lock().unwrap().insert(
            group_info_id.clone(),
            GroupInfo {
                id: group_info_id.clone(),
                group: group.into(),
                name: group.to_uppercase(),
                mail_address: Some(format!("{group}@localhost")),
            },
        );

        self.groups.lock().unwrap().insert(
            group.into(),
            Group {
                id: group.into(),
                group_info: group_info_id.clone(),
                ..Group::default()
            },
        );

        self.folders.lock().unwrap().insert(folders_list_id, folders);

        GroupMembership::new(group, group_info_id)
    }

    pub fn set_folders(&self, list_id: &str, folders: Vec<Folder>) {
        self.folders.lock().unwrap().insert(list_id.into(), folders);
    }

    pub fn set_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn go_online(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    /// Hold folder list loads until [`Remote::open_gate`] is called.
    pub fn close_gate(&self) {
        *self.gate.lock().unwrap() = Some(Arc::new(Semaphore::new(0)));
    }

    /// Release every held folder list load.
    pub fn open_gate(&self) {
        if let Some(gate) = self.gate.lock().unwrap().take() {
            gate.close();
        }
    }

    /// Yield until the given number of folder lists have been read.
    pub async fn wait_for_folder_loads(&self, count: usize) {
        while self.folder_loads.load(Ordering::SeqCst) < count {
            tokio::task::yield_now().await;
        }
    }
}

fn find<K, V>(map: &Mutex<HashMap<K, V>>, kind: EntityKind, id: &K) -> backend::Result<V>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
    V: Clone,
{
    map.lock()
        .unwrap()
        .get(id)
        .cloned()
        .ok_or_else(|| backend::Error::not_found(kind, id))
}

#[async_trait]
impl LoadEntity for Remote {
    async fn load_mailbox_group_root(&self, id: &Id) -> backend::Result<MailboxGroupRoot> {
        self.root_loads.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        find(&self.roots, EntityKind::MailboxGroupRoot, id)
    }

    async fn load_mailbox(&self, id: &Id) -> backend::Result<Mailbox> {
        find(&self.mailboxes, EntityKind::Mailbox, id)
    }

    async fn load_group_info(&self, id: &IdTuple) -> backend::Result<GroupInfo> {
        find(&self.group_infos, EntityKind::GroupInfo, id)
    }

    async fn load_group(&self, id: &Id) -> backend::Result<Group> {
        find(&self.groups, EntityKind::Group, id)
    }

    async fn load_user(&self, id: &Id) -> backend::Result<User> {
        find(&self.users, EntityKind::User, id)
    }

    async fn load_all_folders(&self, list_id: &Id) -> backend::Result<Vec<Folder>> {
        if self.offline.load(Ordering::SeqCst) {
            self.folder_loads.fetch_add(1, Ordering::SeqCst);
            let err = std::io::Error::new(std::io::ErrorKind::NotConnected, "offline");
            return Err(backend::Error::transport(err));
        }

        let folders = self
            .folders
            .lock()
            .unwrap()
            .get(list_id)
            .cloned()
            .unwrap_or_default();
        self.folder_loads.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            // a closed gate means it has been opened
            let _ = gate.acquire().await;
        }

        tokio::task::yield_now().await;
        Ok(folders)
    }
}

/// Records every command sent.
#[derive(Default)]
pub struct Commands {
    pub sent: Mutex<Vec<(Service, Method, Payload)>>,

    /// Makes every command fail with a precondition failure.
    pub busy: AtomicBool,
}

impl Commands {
    pub fn sent(&self) -> Vec<(Service, Method, Payload)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SendCommand for Commands {
    async fn send_command(
        &self,
        service: Service,
        method: Method,
        payload: Payload,
    ) -> backend::Result<()> {
        if self.busy.load(Ordering::SeqCst) {
            return Err(backend::Error::PreconditionFailed(service.to_string()));
        }

        self.sent.lock().unwrap().push((service, method, payload));
        Ok(())
    }
}

/// Signed-in session of the user `me`.
pub struct FakeSession {
    pub memberships: Mutex<Vec<GroupMembership>>,
    pub internal: bool,
    pub internal_communication: bool,
}

impl FakeSession {
    pub fn new(memberships: Vec<GroupMembership>) -> Self {
        Self {
            memberships: Mutex::new(memberships),
            internal: true,
            internal_communication: false,
        }
    }

    pub fn set_memberships(&self, memberships: Vec<GroupMembership>) {
        *self.memberships.lock().unwrap() = memberships;
    }
}

impl Session for FakeSession {
    fn user_id(&self) -> Id {
        "me".into()
    }

    fn mail_group_memberships(&self) -> Vec<GroupMembership> {
        self.memberships.lock().unwrap().clone()
    }

    fn user_mail_group_membership(&self) -> Option<GroupMembership> {
        self.memberships.lock().unwrap().first().cloned()
    }

    fn is_internal_user(&self) -> bool {
        self.internal
    }

    fn is_enabled(&self, feature: Feature) -> bool {
        matches!(feature, Feature::InternalCommunication) && self.internal_communication
    }
}

/// Records notifications and keeps their activation functions.
#[derive(Clone, Default)]
pub struct Notifier {
    pub shown: Arc<Mutex<Vec<(String, String)>>>,
    pub activations: Arc<Mutex<Vec<ActivateFn>>>,
}

impl Notifier {
    pub fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    pub fn activate_all(&self) {
        let activations: Vec<ActivateFn> = self.activations.lock().unwrap().drain(..).collect();
        for activate in activations {
            activate()
        }
    }
}

impl Notify for Notifier {
    fn notify(&self, summary: &str, body: &str, on_activate: ActivateFn) -> AnyResult<()> {
        self.shown
            .lock()
            .unwrap()
            .push((summary.to_owned(), body.to_owned()));
        self.activations.lock().unwrap().push(on_activate);
        Ok(())
    }
}

/// Give spawned tasks a chance to run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn folder(group: &str, kind: FolderKind, mails: &str) -> Folder {
    Folder {
        id: IdTuple::new(format!("folders-{group}"), format!("folder-{mails}")),
        kind,
        name: mails.to_owned(),
        mails: mails.into(),
        sub_folders: format!("sub-{mails}").into(),
        owner_group: group.into(),
    }
}

/// Everything needed to test a mail model.
pub struct Fixture {
    pub remote: Arc<Remote>,
    pub commands: Arc<Commands>,
    pub session: Arc<FakeSession>,
    pub notifier: Notifier,
    pub events: Arc<Mutex<Vec<MailModelEvent>>>,
    pub model: MailModel,
}

impl Fixture {
    /// Two mailboxes: the personal one of group `g1`, with every
    /// system folder and one custom sub-folder of the inbox, and a
    /// shared one of group `g2`.
    pub fn new() -> Self {
        let remote = Arc::new(Remote::default());

        let g1 = remote.add_mail_group(
            "g1",
            vec![
                folder("g1", FolderKind::Inbox, "inbox1"),
                folder("g1", FolderKind::Sent, "sent1"),
                folder("g1", FolderKind::Trash, "trash1"),
                folder("g1", FolderKind::Archive, "archive1"),
                folder("g1", FolderKind::Spam, "spam1"),
                folder("g1", FolderKind::Draft, "draft1"),
            ],
        );
        remote.set_folders("sub-inbox1", vec![folder("g1", FolderKind::Custom, "custom1")]);
        remote.set_folders("sub-custom1", vec![folder("g1", FolderKind::Custom, "deep1")]);

        let g2 = remote.add_mail_group(
            "g2",
            vec![
                folder("g2", FolderKind::Inbox, "inbox2"),
                folder("g2", FolderKind::Trash, "trash2"),
            ],
        );

        remote.set_user(User {
            id: "me".into(),
            memberships: vec![g1.clone(), g2.clone()],
        });

        let session = Arc::new(FakeSession::new(vec![g1, g2]));

        Self::with_session(remote, session)
    }

    pub fn with_session(remote: Arc<Remote>, session: Arc<FakeSession>) -> Self {
        let commands = Arc::new(Commands::default());
        let notifier = Notifier::default();
        let events = Arc::new(Mutex::new(Vec::new()));

        let model = MailModelBuilder::new(session.clone(), remote.clone(), commands.clone())
            .with_notifier(notifier.clone())
            .with_handler({
                let events = events.clone();
                move |event| {
                    events.lock().unwrap().push(event);
                    Ok(())
                }
            })
            .build();

        Self {
            remote,
            commands,
            session,
            notifier,
            events,
            model,
        }
    }

    pub fn events(&self) -> Vec<MailModelEvent> {
        self.events.lock().unwrap().clone()
    }
}
