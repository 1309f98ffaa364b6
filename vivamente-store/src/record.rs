//! On-disk shape of the post and community collections.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::UtcDateTime;
use vivamente_common::model::{
    Id, ModelValidationError, VivamenteSnowflake,
    comment::{Comment, CommentMarker},
    community::{Community, CommunityMarker, Condition},
    content::Content,
    likes::Likes,
    post::{Post, PostMarker},
    user::{Author, UserHandle, UserMarker},
};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    pub id: Id<PostMarker>,
    pub community_id: String,
    pub author_id: Id<UserMarker>,
    pub author_name: String,
    pub content: String,
    /// Unix seconds.
    pub created_at: i64,
    pub likes: u64,
    #[serde(default)]
    pub liked_by: Vec<Id<UserMarker>>,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentRecord {
    pub id: Id<CommentMarker>,
    pub author_id: Id<UserMarker>,
    pub author_name: String,
    pub content: String,
    pub created_at: i64,
    pub likes: u64,
    #[serde(default)]
    pub liked_by: Vec<Id<UserMarker>>,
    #[serde(default)]
    pub replies: Vec<CommentRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommunityRecord {
    pub id: Id<CommunityMarker>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: Condition,
    pub creator_id: Id<UserMarker>,
    pub members_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fails on the first id that was already seen.
pub(crate) fn unique_ids(
    ids: impl IntoIterator<Item = VivamenteSnowflake>,
) -> Result<(), ModelValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ModelValidationError::DuplicateId(id));
        }
    }
    Ok(())
}

fn comment_ids(comments: &[CommentRecord], ids: &mut Vec<VivamenteSnowflake>) {
    for comment in comments {
        ids.push(comment.id.snowflake());
        comment_ids(&comment.replies, ids);
    }
}

fn author(id: Id<UserMarker>, name: String) -> Result<Author, ModelValidationError> {
    Ok(Author {
        id,
        handle: UserHandle::new(name)?,
    })
}

impl TryFrom<CommentRecord> for Comment {
    type Error = ModelValidationError;

    fn try_from(value: CommentRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            author: author(value.author_id, value.author_name)?,
            content: Content::new(value.content)?,
            created_at: UtcDateTime::from_unix_timestamp(value.created_at)?,
            likes: Likes::from_stored(value.likes, value.liked_by)?,
            replies: value
                .replies
                .into_iter()
                .map(Comment::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        let mut ids = Vec::new();
        comment_ids(&value.comments, &mut ids);
        unique_ids(ids)?;

        Ok(Self {
            id: value.id,
            audience: value.community_id.parse()?,
            author: author(value.author_id, value.author_name)?,
            content: Content::new(value.content)?,
            created_at: UtcDateTime::from_unix_timestamp(value.created_at)?,
            likes: Likes::from_stored(value.likes, value.liked_by)?,
            comments: value
                .comments
                .into_iter()
                .map(Comment::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<CommunityRecord> for Community {
    type Error = ModelValidationError;

    fn try_from(value: CommunityRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            name: Content::new(value.name)?.into_inner(),
            description: value.description,
            condition: value.condition,
            creator: value.creator_id,
            members_count: value.members_count,
            tags: value.tags,
        })
    }
}

impl From<&Community> for CommunityRecord {
    fn from(value: &Community) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            description: value.description.clone(),
            condition: value.condition,
            creator_id: value.creator,
            members_count: value.members_count,
            tags: value.tags.clone(),
        }
    }
}

fn likes_record(likes: &Likes) -> (u64, Vec<Id<UserMarker>>) {
    let liked_by: Vec<_> = likes.iter().collect();
    (liked_by.len() as u64, liked_by)
}

impl From<&Comment> for CommentRecord {
    fn from(value: &Comment) -> Self {
        let (likes, liked_by) = likes_record(&value.likes);

        Self {
            id: value.id,
            author_id: value.author.id,
            author_name: value.author.handle.get().to_owned(),
            content: value.content.get().to_owned(),
            created_at: value.created_at.unix_timestamp(),
            likes,
            liked_by,
            replies: value.replies.iter().map(CommentRecord::from).collect(),
        }
    }
}

impl From<&Post> for PostRecord {
    fn from(value: &Post) -> Self {
        let (likes, liked_by) = likes_record(&value.likes);

        Self {
            id: value.id,
            community_id: value.audience.to_string(),
            author_id: value.author.id,
            author_name: value.author.handle.get().to_owned(),
            content: value.content.get().to_owned(),
            created_at: value.created_at.unix_timestamp(),
            likes,
            liked_by,
            comments: value.comments.iter().map(CommentRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{CommunityRecord, PostRecord};
    use vivamente_common::model::{
        Id, ModelValidationError, VivamenteSnowflake,
        community::{Audience, Community, Condition},
        content::InvalidContentError,
        likes::InvalidLikesError,
        post::Post,
    };

    const STORED: &str = r#"{
        "id": 2,
        "communityId": "general",
        "authorId": 10,
        "authorName": "Ana",
        "content": "Breathing exercises helped today.",
        "createdAt": 1761300000,
        "likes": 1,
        "likedBy": [11],
        "comments": [
            {
                "id": 3,
                "authorId": 11,
                "authorName": "Marcos",
                "content": "Same here!",
                "createdAt": 1761303600,
                "likes": 0,
                "replies": [
                    {
                        "id": 4,
                        "authorId": 10,
                        "authorName": "Ana",
                        "content": "Glad to hear it.",
                        "createdAt": 1761307200,
                        "likes": 0
                    }
                ]
            }
        ]
    }"#;

    fn stored() -> PostRecord {
        serde_json::from_str(STORED).unwrap()
    }

    #[test]
    fn stored_post_loads() {
        let post = Post::try_from(stored()).unwrap();

        assert_eq!(post.audience, Audience::General);
        assert_eq!(post.author.handle.get(), "Ana");
        assert_eq!(post.likes.count(), 1);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].replies[0].content.get(), "Glad to hear it.");
        assert_eq!(post.comments[0].replies[0].likes.count(), 0);
        assert_eq!(post.created_at.unix_timestamp(), 1_761_300_000);

        assert_eq!(PostRecord::from(&post), stored());
    }

    #[test]
    fn invalid_records_are_rejected() {
        let mut record = stored();
        record.likes = 12;
        assert_eq!(
            Post::try_from(record),
            Err(ModelValidationError::Likes(
                InvalidLikesError::CountMismatch {
                    count: 12,
                    likers: 1
                }
            ))
        );

        let mut record = stored();
        record.comments[0].replies[0].content = "   ".to_owned();
        assert_eq!(
            Post::try_from(record),
            Err(ModelValidationError::Content(InvalidContentError))
        );

        let mut record = stored();
        record.community_id = "c1".to_owned();
        assert!(matches!(
            Post::try_from(record),
            Err(ModelValidationError::Audience(_))
        ));

        let mut record = stored();
        record.author_name = "x".repeat(51);
        assert!(matches!(
            Post::try_from(record),
            Err(ModelValidationError::UserHandle(_))
        ));
    }

    #[test]
    fn duplicate_comment_ids_are_rejected() {
        let mut record = stored();
        let mut twin = record.comments[0].clone();
        twin.author_id = Id::from(12);
        twin.replies.clear();
        record.comments.push(twin);
        assert_eq!(
            Post::try_from(record),
            Err(ModelValidationError::DuplicateId(VivamenteSnowflake::new(3)))
        );

        let mut record = stored();
        record.comments[0].replies[0].id = Id::from(3);
        assert_eq!(
            Post::try_from(record),
            Err(ModelValidationError::DuplicateId(VivamenteSnowflake::new(3)))
        );
    }

    #[test]
    fn stored_community_loads() {
        let record: CommunityRecord = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Calm Minds",
                "description": "Breathing techniques.",
                "condition": "anxiety",
                "creatorId": 10,
                "membersCount": 1240,
                "tags": ["Calm"]
            }"#,
        )
        .unwrap();

        let community = Community::try_from(record.clone()).unwrap();
        assert_eq!(community.condition, Condition::Anxiety);
        assert_eq!(community.creator, Id::from(10));
        assert_eq!(community.members_count, 1240);
        assert_eq!(CommunityRecord::from(&community), record);

        let mut blank = record;
        blank.name = " ".to_owned();
        assert_eq!(
            Community::try_from(blank),
            Err(ModelValidationError::Content(InvalidContentError))
        );
    }
}
