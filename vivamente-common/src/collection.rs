//! Operations on the ordered post collection, newest post first.

use crate::model::{
    Id,
    comment::Comment,
    post::{Post, PostMarker},
    user::UserMarker,
};
use std::mem;

#[must_use]
pub fn find_post(collection: &[Post], id: Id<PostMarker>) -> Option<&Post> {
    collection.iter().find(|post| post.id == id)
}

#[must_use]
pub fn create_post(mut collection: Vec<Post>, post: Post) -> Vec<Post> {
    collection.insert(0, post);
    collection
}

/// Removes the post if `requester` wrote it, otherwise returns the
/// collection unchanged.
#[must_use]
pub fn delete_post(
    collection: Vec<Post>,
    id: Id<PostMarker>,
    requester: Id<UserMarker>,
) -> Vec<Post> {
    let authorized = find_post(&collection, id).is_some_and(|post| post.author.id == requester);
    if !authorized {
        return collection;
    }

    collection.into_iter().filter(|post| post.id != id).collect()
}

#[must_use]
pub fn toggle_post_like(
    collection: Vec<Post>,
    id: Id<PostMarker>,
    user: Id<UserMarker>,
) -> Vec<Post> {
    collection
        .into_iter()
        .map(|mut post| {
            if post.id == id {
                post.likes.toggle(user);
            }
            post
        })
        .collect()
}

/// Runs `transform` over the comments of the post with the given id.
///
/// All other posts are passed through untouched.
#[must_use]
pub fn apply_to_post<F>(collection: Vec<Post>, id: Id<PostMarker>, transform: F) -> Vec<Post>
where
    F: FnOnce(Vec<Comment>) -> Vec<Comment>,
{
    let mut transform = Some(transform);
    collection
        .into_iter()
        .map(|mut post| {
            if post.id == id
                && let Some(transform) = transform.take()
            {
                post.comments = transform(mem::take(&mut post.comments));
            }
            post
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        collection::{apply_to_post, create_post, delete_post, find_post, toggle_post_like},
        forest,
        model::{
            Id,
            comment::Comment,
            community::Audience,
            content::Content,
            likes::Likes,
            post::Post,
            user::{Author, UserHandle},
        },
    };
    use time::macros::utc_datetime;

    fn author(id: u64) -> Author {
        Author {
            id: Id::from(id),
            handle: UserHandle::new(format!("user{id}")).unwrap(),
        }
    }

    fn post(id: u64, author_id: u64) -> Post {
        Post {
            id: Id::from(id),
            audience: Audience::General,
            author: author(author_id),
            content: Content::new(format!("post {id}")).unwrap(),
            created_at: utc_datetime!(2025-06-01 12:00),
            likes: Likes::new(),
            comments: Vec::new(),
        }
    }

    fn comment(id: u64) -> Comment {
        Comment {
            id: Id::from(id),
            author: author(1),
            content: Content::new(format!("comment {id}")).unwrap(),
            created_at: utc_datetime!(2025-06-01 12:30),
            likes: Likes::new(),
            replies: Vec::new(),
        }
    }

    fn ids(collection: &[Post]) -> Vec<u64> {
        collection.iter().map(|post| u64::from(post.id)).collect()
    }

    #[test]
    fn newest_post_first() {
        let collection = create_post(Vec::new(), post(1, 1));
        let collection = create_post(collection, post(2, 1));
        let collection = create_post(collection, post(3, 2));

        assert_eq!(ids(&collection), [3, 2, 1]);
    }

    #[test]
    fn only_the_author_deletes() {
        let collection = vec![post(2, 20), post(1, 10)];

        let unchanged = delete_post(collection.clone(), Id::from(1), Id::from(20));
        assert_eq!(unchanged, collection);

        let deleted = delete_post(collection.clone(), Id::from(1), Id::from(10));
        assert_eq!(ids(&deleted), [2]);

        let missing = delete_post(collection.clone(), Id::from(3), Id::from(10));
        assert_eq!(missing, collection);
    }

    #[test]
    fn post_like_toggles() {
        let collection = vec![post(2, 20), post(1, 10)];

        let liked = toggle_post_like(collection.clone(), Id::from(1), Id::from(5));
        assert!(find_post(&liked, Id::from(1)).unwrap().likes.contains(Id::from(5)));
        assert_eq!(find_post(&liked, Id::from(2)).unwrap().likes.count(), 0);

        let unliked = toggle_post_like(liked, Id::from(1), Id::from(5));
        assert_eq!(unliked, collection);
    }

    #[test]
    fn apply_to_post_targets_one_post() {
        let collection = vec![post(2, 20), post(1, 10)];

        let updated = apply_to_post(collection.clone(), Id::from(1), |comments| {
            let mut comments = comments;
            comments.push(comment(100));
            comments
        });
        assert_eq!(updated[0], collection[0]);
        assert_eq!(updated[1].comments, vec![comment(100)]);

        let replied = apply_to_post(updated, Id::from(1), |comments| {
            forest::add_reply(comments, Id::from(100), comment(101))
        });
        assert_eq!(replied[1].comments[0].replies, vec![comment(101)]);

        let missing = apply_to_post(collection.clone(), Id::from(9), |_| vec![comment(100)]);
        assert_eq!(missing, collection);
    }
}
