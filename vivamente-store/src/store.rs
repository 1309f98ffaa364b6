use crate::persistence::{Persistence, PersistenceError};
use thiserror::Error;
use time::UtcDateTime;
use tracing::{debug, warn};
use vivamente_common::{
    collection, forest,
    model::{
        Id, VivamenteSnowflake, VivamenteSnowflakeGenerator,
        comment::{Comment, CommentMarker, CreateComment},
        community::CommunityMarker,
        likes::LikeChange,
        post::{CreatePost, Post, PostMarker},
        user::UserMarker,
    },
    snowflake::{ProcessId, SnowflakeTimestampFromDateTimeError, WorkerId},
    util,
};

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("The system clock cannot be used for new ids: {0}")]
    Clock(#[from] SnowflakeTimestampFromDateTimeError),
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("Comment with id {comment} was not found on post {post}.")]
    CommentNotFound {
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
    },
    #[error("Community with id {0} was not found.")]
    CommunityNotFound(Id<CommunityMarker>),
    #[error("User {requester} is not the author of post {post}.")]
    NotPostAuthor {
        post: Id<PostMarker>,
        requester: Id<UserMarker>,
    },
    #[error("User {requester} is not the author of comment {comment}.")]
    NotCommentAuthor {
        comment: Id<CommentMarker>,
        requester: Id<UserMarker>,
    },
}

/// Owns the post collection and writes every change through to persistence.
///
/// A change only replaces the in-memory collection once it has been saved,
/// so memory and storage never disagree.
#[derive(Debug)]
pub struct PostStore<P> {
    persistence: P,
    posts: Vec<Post>,
    snowflake_generator: VivamenteSnowflakeGenerator,
}

impl<P: Persistence<Item = Post>> PostStore<P> {
    /// Loads the stored collection, starting empty if nothing was stored.
    pub fn open(persistence: P, worker_id: WorkerId, process_id: ProcessId) -> Result<Self> {
        Self::open_or_seed(persistence, worker_id, process_id, |_| Vec::new())
    }

    /// Loads the stored collection, or saves and uses `seed` if nothing was
    /// stored yet. An empty stored collection is kept as is.
    pub fn open_or_seed<F>(
        mut persistence: P,
        worker_id: WorkerId,
        process_id: ProcessId,
        seed: F,
    ) -> Result<Self>
    where
        F: FnOnce(&mut VivamenteSnowflakeGenerator) -> Vec<Post>,
    {
        let mut snowflake_generator = VivamenteSnowflakeGenerator::new(worker_id, process_id);

        let posts = if let Some(posts) = persistence.load()? {
            posts
        } else {
            let posts = seed(&mut snowflake_generator);
            debug!(count = posts.len(), "Seeding post collection");
            persistence.save(&posts)?;
            posts
        };

        Ok(Self {
            persistence,
            posts,
            snowflake_generator,
        })
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn post(&self, id: Id<PostMarker>) -> Option<&Post> {
        collection::find_post(&self.posts, id)
    }

    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn create_post(&mut self, post: CreatePost) -> Result<Id<PostMarker>> {
        let (id, created_at) = stamp(&mut self.snowflake_generator)?;
        let id = id.into();

        let posts = collection::create_post(self.posts.clone(), Post::new(id, post, created_at));
        self.commit(posts)?;

        debug!(post = %id, "Created post");
        Ok(id)
    }

    pub fn check_can_delete_post(
        &self,
        post: Id<PostMarker>,
        requester: Id<UserMarker>,
    ) -> Result<()> {
        let author = self.existing_post(post)?.author.id;
        if author == requester {
            Ok(())
        } else {
            Err(StoreError::NotPostAuthor { post, requester })
        }
    }

    pub fn delete_post(&mut self, post: Id<PostMarker>, requester: Id<UserMarker>) -> Result<()> {
        self.check_can_delete_post(post, requester)
            .inspect_err(|err| warn!(error = %err, "Rejected post deletion"))?;

        let posts = collection::delete_post(self.posts.clone(), post, requester);
        self.commit(posts)?;

        debug!(%post, "Deleted post");
        Ok(())
    }

    pub fn toggle_post_like(
        &mut self,
        post: Id<PostMarker>,
        user: Id<UserMarker>,
    ) -> Result<LikeChange> {
        let change = if self.existing_post(post)?.likes.contains(user) {
            LikeChange::Unliked
        } else {
            LikeChange::Liked
        };

        let posts = collection::toggle_post_like(self.posts.clone(), post, user);
        self.commit(posts)?;

        Ok(change)
    }

    /// Adds a top-level comment as the newest comment of the post.
    pub fn add_comment(
        &mut self,
        post: Id<PostMarker>,
        comment: CreateComment,
    ) -> Result<Id<CommentMarker>> {
        self.existing_post(post)?;

        let comment = self.new_comment(comment)?;
        let id = comment.id;

        let posts = collection::apply_to_post(self.posts.clone(), post, |mut comments| {
            comments.push(comment);
            comments
        });
        self.commit(posts)?;

        debug!(%post, comment = %id, "Added comment");
        Ok(id)
    }

    pub fn add_reply(
        &mut self,
        post: Id<PostMarker>,
        parent: Id<CommentMarker>,
        reply: CreateComment,
    ) -> Result<Id<CommentMarker>> {
        self.existing_comment(post, parent)?;

        let reply = self.new_comment(reply)?;
        let id = reply.id;

        let posts = collection::apply_to_post(self.posts.clone(), post, |comments| {
            forest::add_reply(comments, parent, reply)
        });
        self.commit(posts)?;

        debug!(%post, %parent, reply = %id, "Added reply");
        Ok(id)
    }

    pub fn toggle_comment_like(
        &mut self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
        user: Id<UserMarker>,
    ) -> Result<LikeChange> {
        let change = if self.existing_comment(post, comment)?.likes.contains(user) {
            LikeChange::Unliked
        } else {
            LikeChange::Liked
        };

        let posts = collection::apply_to_post(self.posts.clone(), post, |comments| {
            forest::toggle_like(comments, comment, user)
        });
        self.commit(posts)?;

        Ok(change)
    }

    pub fn check_can_delete_comment(
        &self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
        requester: Id<UserMarker>,
    ) -> Result<()> {
        let author = self.existing_comment(post, comment)?.author.id;
        if author == requester {
            Ok(())
        } else {
            Err(StoreError::NotCommentAuthor { comment, requester })
        }
    }

    /// Deletes the comment and every reply beneath it.
    pub fn delete_comment(
        &mut self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
        requester: Id<UserMarker>,
    ) -> Result<()> {
        self.check_can_delete_comment(post, comment, requester)
            .inspect_err(|err| warn!(error = %err, "Rejected comment deletion"))?;

        let posts = collection::apply_to_post(self.posts.clone(), post, |comments| {
            forest::delete(comments, comment)
        });
        self.commit(posts)?;

        debug!(%post, %comment, "Deleted comment");
        Ok(())
    }

    fn new_comment(&mut self, comment: CreateComment) -> Result<Comment> {
        let (id, created_at) = stamp(&mut self.snowflake_generator)?;
        Ok(Comment::new(id.into(), comment, created_at))
    }

    fn existing_post(&self, id: Id<PostMarker>) -> Result<&Post> {
        self.post(id).ok_or_else(|| {
            let err = StoreError::PostNotFound(id);
            warn!(error = %err, "Target post vanished");
            err
        })
    }

    fn existing_comment(
        &self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
    ) -> Result<&Comment> {
        forest::find(&self.existing_post(post)?.comments, comment).ok_or_else(|| {
            let err = StoreError::CommentNotFound { post, comment };
            warn!(error = %err, "Target comment vanished");
            err
        })
    }

    fn commit(&mut self, posts: Vec<Post>) -> Result<()> {
        self.persistence.save(&posts)?;
        self.posts = posts;
        Ok(())
    }
}

/// A fresh id and creation time for a new entry.
///
/// The creation time is cut to whole seconds so it survives being stored.
pub(crate) fn stamp(
    generator: &mut VivamenteSnowflakeGenerator,
) -> Result<(VivamenteSnowflake, UtcDateTime)> {
    let now = UtcDateTime::now();
    let id = generator
        .try_generate_at(now)
        .inspect_err(|err| warn!(error = %err, %now, "Clock is outside the id range"))?;

    Ok((id, util::whole_seconds(now)))
}
