use crate::model::{
    Id,
    comment::Comment,
    community::Audience,
    content::Content,
    likes::Likes,
    user::Author,
};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub audience: Audience,
    pub author: Author,
    pub content: Content,
    pub created_at: UtcDateTime,
    pub likes: Likes,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct CreatePost {
    pub audience: Audience,
    pub author: Author,
    pub content: Content,
}

impl Post {
    #[must_use]
    pub fn new(id: Id<PostMarker>, post: CreatePost, created_at: UtcDateTime) -> Self {
        Self {
            id,
            audience: post.audience,
            author: post.author,
            content: post.content,
            created_at,
            likes: Likes::new(),
            comments: Vec::new(),
        }
    }
}
