use crate::ports::{NotificationKind, Notifier};
use thiserror::Error;
use tracing::{debug, warn};
use vivamente_common::model::{
    Id, community::Audience, content::InvalidContentError, post::PostMarker,
};
use vivamente_store::store::StoreError;

pub mod controller;
pub mod ports;
pub mod render;
pub mod seed;

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Submission was blank: {0}")]
    BlankContent(#[from] InvalidContentError),
    #[error("Post with id {0} is not visible to the viewer.")]
    PostNotVisible(Id<PostMarker>),
    #[error("The viewer is not a member of audience {0}.")]
    AudienceNotVisible(Audience),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FeedError {
    /// What the viewer is told about the failure.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            FeedError::BlankContent(_) => "Write something first.",
            FeedError::PostNotVisible(_) | FeedError::AudienceNotVisible(_) => {
                "Join the group to take part in its posts."
            }
            FeedError::Store(
                StoreError::PostNotFound(_)
                | StoreError::CommentNotFound { .. }
                | StoreError::CommunityNotFound(_),
            ) => "That no longer exists.",
            FeedError::Store(
                StoreError::NotPostAuthor { .. } | StoreError::NotCommentAuthor { .. },
            ) => "Only the author can delete this.",
            FeedError::Store(StoreError::Persistence(_) | StoreError::Clock(_)) => {
                "Your change could not be saved."
            }
        }
    }

    /// Logs the failure and, unless the submission was simply blank, tells
    /// the viewer about it.
    pub fn report(&self, notifier: &impl Notifier) {
        if let FeedError::BlankContent(_) = self {
            debug!(error = %self, "Discarding submission");
            return;
        }

        warn!(error = %self, "Viewer intent failed");
        notifier.notify(self.notice(), NotificationKind::Info);
    }
}
