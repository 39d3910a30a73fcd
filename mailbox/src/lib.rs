#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

//! ## Features
//!
//! ### Mail model
//!
//! - [`MailModel::init`](crate::model::MailModel::init)
//! - [`MailModel::on_events`](crate::model::MailModel::on_events)
//! - [`MailModel::find_mailbox_details_by_mail_list_id`](crate::model::MailModel::find_mailbox_details_by_mail_list_id)
//! - [`MailModel::find_mailbox_details_by_mail_group`](crate::model::MailModel::find_mailbox_details_by_mail_group)
//! - [`MailModel::find_user_mailbox_details`](crate::model::MailModel::find_user_mailbox_details)
//! - [`MailModel::find_folder`](crate::model::MailModel::find_folder)
//!
//! ### Message
//!
//! - [`MoveMails`](crate::message::move_::MoveMails)
//! - [`DeleteMails`](crate::message::delete::DeleteMails)
//!
//! ### Backend ports
//!
//! - [`LoadEntity`](crate::backend::LoadEntity)
//! - [`SendCommand`](crate::backend::SendCommand)
//! - [`Session`](crate::backend::Session)
//! - [`Notify`](crate::notify::Notify)

pub mod backend;
pub mod config;
pub mod detail;
pub mod entity;
mod error;
pub mod folder;
pub mod message;
pub mod model;
pub mod notify;

#[doc(inline)]
pub use self::{
    error::{AnyBoxedError, AnyError, AnyResult, Error, Result},
    message::{delete::DeleteMails, move_::MoveMails},
    model::{MailModel, MailModelBuilder, MailModelEvent},
};
