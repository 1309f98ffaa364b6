use crate::{
    FeedError, Result,
    ports::{Confirm, NotificationKind, Notifier},
    render::RenderedFeed,
};
use time::UtcDateTime;
use vivamente_common::model::{
    Id,
    comment::{CommentMarker, CreateComment},
    community::{Audience, Community, CommunityMarker, Condition, CreateCommunity},
    content::Content,
    likes::LikeChange,
    post::{CreatePost, Post, PostMarker},
    user::{Membership, User},
};
use vivamente_store::{
    communities::CommunityStore,
    persistence::Persistence,
    store::{PostStore, StoreError},
};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Deletion {
    Deleted,
    Cancelled,
}

/// Turns the viewer's intents into store operations and notices.
///
/// The viewer only sees, and may only act on, posts addressed to the general
/// audience or to a community they joined.
#[derive(Debug)]
pub struct FeedController<P, N, C> {
    store: PostStore<P>,
    viewer: User,
    notifier: N,
    confirm: C,
}

impl<P, N, C> FeedController<P, N, C>
where
    P: Persistence<Item = Post>,
    N: Notifier,
    C: Confirm,
{
    #[must_use]
    pub fn new(store: PostStore<P>, viewer: User, notifier: N, confirm: C) -> Self {
        Self {
            store,
            viewer,
            notifier,
            confirm,
        }
    }

    #[must_use]
    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    /// Membership changes take effect on the next read.
    pub fn viewer_mut(&mut self) -> &mut User {
        &mut self.viewer
    }

    #[must_use]
    pub fn store(&self) -> &PostStore<P> {
        &self.store
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[must_use]
    pub fn visible_posts(&self) -> Vec<&Post> {
        self.store
            .posts()
            .iter()
            .filter(|post| self.viewer.can_see(post.audience))
            .collect()
    }

    #[must_use]
    pub fn render<'a>(
        &'a self,
        communities: &'a [Community],
        now: UtcDateTime,
    ) -> RenderedFeed<'a> {
        RenderedFeed::new(self.visible_posts(), communities, now)
    }

    pub fn create_post(&mut self, audience: Audience, text: &str) -> Result<Id<PostMarker>> {
        let result = self.try_create_post(audience, text);
        self.reported(result)
    }

    pub fn delete_post(&mut self, post: Id<PostMarker>) -> Result<Deletion> {
        let result = self.try_delete_post(post);
        self.reported(result)
    }

    pub fn like_post(&mut self, post: Id<PostMarker>) -> Result<LikeChange> {
        let result = self.try_like_post(post);
        self.reported(result)
    }

    pub fn comment(&mut self, post: Id<PostMarker>, text: &str) -> Result<Id<CommentMarker>> {
        let result = self.try_comment(post, text);
        self.reported(result)
    }

    pub fn reply(
        &mut self,
        post: Id<PostMarker>,
        parent: Id<CommentMarker>,
        text: &str,
    ) -> Result<Id<CommentMarker>> {
        let result = self.try_reply(post, parent, text);
        self.reported(result)
    }

    pub fn like_comment(
        &mut self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
    ) -> Result<LikeChange> {
        let result = self.try_like_comment(post, comment);
        self.reported(result)
    }

    pub fn delete_comment(
        &mut self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
    ) -> Result<Deletion> {
        let result = self.try_delete_comment(post, comment);
        self.reported(result)
    }

    /// Creates a community with the viewer as its first member.
    pub fn create_community<Q>(
        &mut self,
        communities: &mut CommunityStore<Q>,
        name: &str,
        description: &str,
        condition: Condition,
    ) -> Result<Id<CommunityMarker>>
    where
        Q: Persistence<Item = Community>,
    {
        let result = self.try_create_community(communities, name, description, condition);
        self.reported(result)
    }

    /// Joins or leaves a community; the feed follows on the next read.
    pub fn toggle_membership<Q>(
        &mut self,
        communities: &mut CommunityStore<Q>,
        community: Id<CommunityMarker>,
    ) -> Result<Membership>
    where
        Q: Persistence<Item = Community>,
    {
        let result = self.try_toggle_membership(communities, community);
        self.reported(result)
    }

    fn try_create_community<Q>(
        &mut self,
        communities: &mut CommunityStore<Q>,
        name: &str,
        description: &str,
        condition: Condition,
    ) -> Result<Id<CommunityMarker>>
    where
        Q: Persistence<Item = Community>,
    {
        let name = Content::try_from(name)?.into_inner();

        let id = communities.create_community(
            CreateCommunity {
                name,
                description: description.trim().to_owned(),
                condition,
            },
            &mut self.viewer,
        )?;

        self.notifier
            .notify("Group created.", NotificationKind::Success);
        Ok(id)
    }

    fn try_toggle_membership<Q>(
        &mut self,
        communities: &mut CommunityStore<Q>,
        community: Id<CommunityMarker>,
    ) -> Result<Membership>
    where
        Q: Persistence<Item = Community>,
    {
        let membership = communities.toggle_membership(community, &mut self.viewer)?;

        let name = Audience::Community(community).display_name(communities.communities());
        let message = match membership {
            Membership::Joined => format!("You joined {name}."),
            Membership::Left => format!("You left {name}."),
        };
        self.notifier.notify(&message, NotificationKind::Info);
        Ok(membership)
    }

    fn try_create_post(&mut self, audience: Audience, text: &str) -> Result<Id<PostMarker>> {
        if !self.viewer.can_see(audience) {
            return Err(FeedError::AudienceNotVisible(audience));
        }
        let content = Content::try_from(text)?;

        let id = self.store.create_post(CreatePost {
            audience,
            author: self.viewer.author(),
            content,
        })?;

        self.notifier
            .notify("Post published.", NotificationKind::Success);
        Ok(id)
    }

    fn try_delete_post(&mut self, post: Id<PostMarker>) -> Result<Deletion> {
        self.visible_post(post)?;
        self.store.check_can_delete_post(post, self.viewer.id)?;

        if !self.confirm.confirm("Delete this post permanently?") {
            return Ok(Deletion::Cancelled);
        }

        self.store.delete_post(post, self.viewer.id)?;
        self.notifier.notify("Post removed.", NotificationKind::Info);
        Ok(Deletion::Deleted)
    }

    fn try_like_post(&mut self, post: Id<PostMarker>) -> Result<LikeChange> {
        let author = self.visible_post(post)?.author.handle.clone();

        let change = self.store.toggle_post_like(post, self.viewer.id)?;
        if change == LikeChange::Liked {
            self.notifier.notify(
                &format!("You liked {}'s post.", author.get()),
                NotificationKind::Info,
            );
        }
        Ok(change)
    }

    fn try_comment(&mut self, post: Id<PostMarker>, text: &str) -> Result<Id<CommentMarker>> {
        let author = self.visible_post(post)?.author.handle.clone();
        let comment = self.new_comment(text)?;

        let id = self.store.add_comment(post, comment)?;
        self.notifier.notify(
            &format!(
                "{} commented on {}'s post.",
                self.viewer.handle.get(),
                author.get()
            ),
            NotificationKind::Info,
        );
        Ok(id)
    }

    fn try_reply(
        &mut self,
        post: Id<PostMarker>,
        parent: Id<CommentMarker>,
        text: &str,
    ) -> Result<Id<CommentMarker>> {
        self.visible_post(post)?;
        let reply = self.new_comment(text)?;

        let id = self.store.add_reply(post, parent, reply)?;
        self.notifier
            .notify("Your reply was sent.", NotificationKind::Info);
        Ok(id)
    }

    fn try_like_comment(
        &mut self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
    ) -> Result<LikeChange> {
        self.visible_post(post)?;

        Ok(self
            .store
            .toggle_comment_like(post, comment, self.viewer.id)?)
    }

    fn try_delete_comment(
        &mut self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
    ) -> Result<Deletion> {
        self.visible_post(post)?;
        self.store
            .check_can_delete_comment(post, comment, self.viewer.id)?;

        if !self.confirm.confirm("Delete your comment permanently?") {
            return Ok(Deletion::Cancelled);
        }

        self.store.delete_comment(post, comment, self.viewer.id)?;
        self.notifier
            .notify("Comment deleted.", NotificationKind::Info);
        Ok(Deletion::Deleted)
    }

    fn visible_post(&self, id: Id<PostMarker>) -> Result<&Post> {
        let post = self.store.post(id).ok_or(StoreError::PostNotFound(id))?;
        if self.viewer.can_see(post.audience) {
            Ok(post)
        } else {
            Err(FeedError::PostNotVisible(id))
        }
    }

    fn new_comment(&self, text: &str) -> Result<CreateComment> {
        Ok(CreateComment {
            author: self.viewer.author(),
            content: Content::try_from(text)?,
        })
    }

    fn reported<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            err.report(&self.notifier);
        }
        result
    }
}
