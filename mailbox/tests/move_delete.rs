mod common;

use std::sync::{atomic::Ordering, Arc};

use common::{folder, FakeSession, Fixture, Remote};
use mailbox::{
    backend::{Method, Service},
    entity::{Id, IdTuple},
    folder::FolderKind,
    message::{DeleteMailData, Mail, MoveMailData, Payload},
    DeleteMails, MailModelEvent, MoveMails,
};

#[test_log::test(tokio::test)]
async fn test_move_mails() {
    let fixture = Fixture::new();
    let model = &fixture.model;
    model.init().await.unwrap();

    let target = model.find_folder(&Id::from("custom1")).unwrap();

    let mails = [
        Mail::new(("custom1", "a"), "g1"),
        Mail::new(("inbox1", "b"), "g1"),
        Mail::new(("inbox2", "c"), "g2"),
    ];

    model.move_mails(&mails, &target).await.unwrap();

    assert_eq!(
        fixture.commands.sent(),
        vec![(
            Service::MoveMailService,
            Method::Post,
            Payload::MoveMail(MoveMailData {
                target_folder: target.id.clone(),
                mails: vec![IdTuple::from(("inbox1", "b"))],
            }),
        )]
    );
}

#[test_log::test(tokio::test)]
async fn test_move_nothing() {
    let fixture = Fixture::new();
    let model = &fixture.model;
    model.init().await.unwrap();

    let target = model.find_folder(&Id::from("inbox1")).unwrap();
    let mails = [Mail::new(("inbox1", "a"), "g1")];

    model.move_mails(&mails, &target).await.unwrap();
    model.move_mails(&[], &target).await.unwrap();

    assert!(fixture.commands.sent().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_delete_mails() {
    let fixture = Fixture::new();
    let model = &fixture.model;
    model.init().await.unwrap();

    let mails = [
        Mail::new(("trash1", "t"), "g1"),
        Mail::new(("spam1", "s"), "g1"),
        Mail::new(("inbox1", "i"), "g1"),
    ];

    model.delete_mails(&mails).await.unwrap();

    let sent = fixture.commands.sent();
    assert_eq!(sent.len(), 2);

    assert!(sent.contains(&(
        Service::MailService,
        Method::Delete,
        Payload::DeleteMail(DeleteMailData {
            mails: vec![
                IdTuple::from(("trash1", "t")),
                IdTuple::from(("spam1", "s")),
            ],
        }),
    )));

    let trash = model.find_folder(&Id::from("trash1")).unwrap();
    assert!(sent.contains(&(
        Service::MoveMailService,
        Method::Post,
        Payload::MoveMail(MoveMailData {
            target_folder: trash.id,
            mails: vec![IdTuple::from(("inbox1", "i"))],
        }),
    )));
}

#[test_log::test(tokio::test)]
async fn test_delete_mails_from_unknown_folder() {
    let fixture = Fixture::new();
    let model = &fixture.model;
    model.init().await.unwrap();

    let mails = [Mail::new(("nowhere", "n"), "g1")];

    let err = model.delete_mails(&mails).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(fixture.commands.sent().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_delete_mails_without_trash() {
    let remote = Arc::new(Remote::default());
    let membership = remote.add_mail_group("g1", vec![folder("g1", FolderKind::Inbox, "inbox1")]);
    let session = Arc::new(FakeSession::new(vec![membership]));

    let fixture = Fixture::with_session(remote, session);
    let model = &fixture.model;
    model.init().await.unwrap();

    let mails = [Mail::new(("inbox1", "a"), "g1")];

    let err = model.delete_mails(&mails).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(fixture.commands.sent().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_delete_mails_across_mailboxes() {
    let fixture = Fixture::new();
    let model = &fixture.model;
    model.init().await.unwrap();

    // the trash folder is resolved from the first mail, mails of
    // other mailboxes never move across
    let mails = [
        Mail::new(("inbox1", "a"), "g1"),
        Mail::new(("inbox2", "b"), "g2"),
    ];

    model.delete_mails(&mails).await.unwrap();

    let trash = model.find_folder(&Id::from("trash1")).unwrap();
    assert_eq!(
        fixture.commands.sent(),
        vec![(
            Service::MoveMailService,
            Method::Post,
            Payload::MoveMail(MoveMailData {
                target_folder: trash.id,
                mails: vec![IdTuple::from(("inbox1", "a"))],
            }),
        )]
    );
}

#[test_log::test(tokio::test)]
async fn test_operation_still_active() {
    let fixture = Fixture::new();
    let model = &fixture.model;
    model.init().await.unwrap();

    fixture.commands.busy.store(true, Ordering::SeqCst);

    let target = model.find_folder(&Id::from("archive1")).unwrap();
    let mails = [Mail::new(("inbox1", "a"), "g1")];

    model.move_mails(&mails, &target).await.unwrap();
    model.delete_mails(&mails).await.unwrap();

    assert!(fixture.commands.sent().is_empty());
    assert_eq!(
        fixture.events(),
        vec![
            MailModelEvent::OperationStillActive,
            MailModelEvent::OperationStillActive,
        ]
    );
}
