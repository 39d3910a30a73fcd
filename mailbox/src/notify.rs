//! # Notify module
//!
//! Module dedicated to new mail notifications. The [`Notify`] port is
//! implemented by the host. With the `notify` cargo feature, the
//! library ships [`SystemNotify`], which sends desktop notifications.

use crate::AnyResult;

/// The function called when the user activates a notification.
pub type ActivateFn = Box<dyn FnOnce() + Send + 'static>;

/// The notification port.
pub trait Notify: Send + Sync {
    /// Show a notification with the given summary and body.
    ///
    /// The given function should be called when the user activates
    /// the notification. It is never called otherwise.
    fn notify(&self, summary: &str, body: &str, on_activate: ActivateFn) -> AnyResult<()>;
}

/// The desktop notifier, based on [`notify_rust`].
///
/// Notifications are shown from a blocking task, so this notifier
/// must be used from within a tokio runtime. Activation is only
/// supported by XDG desktops.
#[cfg(feature = "notify")]
#[derive(Clone, Debug, Default)]
pub struct SystemNotify;

#[cfg(feature = "notify")]
impl Notify for SystemNotify {
    fn notify(&self, summary: &str, body: &str, on_activate: ActivateFn) -> AnyResult<()> {
        use notify_rust::Notification;
        use tracing::debug;

        let summary = summary.to_owned();
        let body = body.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut notification = Notification::new();
            notification.summary(&summary).body(&body);

            #[cfg(all(unix, not(target_os = "macos")))]
            {
                notification.action("default", "Open");
                match notification.show() {
                    Ok(handle) => handle.wait_for_action(|action| {
                        if action == "default" {
                            on_activate()
                        }
                    }),
                    Err(err) => {
                        debug!("error while sending system notification");
                        debug!("{err:?}");
                    }
                }
            }

            #[cfg(not(all(unix, not(target_os = "macos"))))]
            {
                drop(on_activate);
                if let Err(err) = notification.show() {
                    debug!("error while sending system notification");
                    debug!("{err:?}");
                }
            }
        });

        Ok(())
    }
}
