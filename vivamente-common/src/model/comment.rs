use crate::model::{Id, content::Content, likes::Likes, user::Author};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

/// A comment and, recursively, its replies. Each node owns its children.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub author: Author,
    pub content: Content,
    pub created_at: UtcDateTime,
    pub likes: Likes,
    /// Oldest first.
    pub replies: Vec<Comment>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct CreateComment {
    pub author: Author,
    pub content: Content,
}

impl Comment {
    #[must_use]
    pub fn new(id: Id<CommentMarker>, comment: CreateComment, created_at: UtcDateTime) -> Self {
        Self {
            id,
            author: comment.author,
            content: comment.content,
            created_at,
            likes: Likes::new(),
            replies: Vec::new(),
        }
    }
}
