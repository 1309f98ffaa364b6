//! Collaborators the feed reports to and asks before destructive actions.

use tracing::info;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum NotificationKind {
    Info,
    Success,
}

/// Fire-and-forget notices for the viewer.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Yes/no prompt shown before anything is deleted.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Writes notices to the log.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        info!(?kind, "{message}");
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
