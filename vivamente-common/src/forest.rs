//! Operations on a forest of comment trees.
//!
//! Every transform consumes the forest and hands back the rebuilt one. A
//! target id that is not in the forest leaves it unchanged; callers that
//! care look it up with [`find`] first.

use crate::model::{
    Id,
    comment::{Comment, CommentMarker},
    user::UserMarker,
};
use std::mem;

/// Depth-first lookup of the comment with the given id.
#[must_use]
pub fn find(forest: &[Comment], id: Id<CommentMarker>) -> Option<&Comment> {
    forest.iter().find_map(|comment| {
        if comment.id == id {
            Some(comment)
        } else {
            find(&comment.replies, id)
        }
    })
}

/// Number of comments in the forest, replies included.
#[must_use]
pub fn count(forest: &[Comment]) -> usize {
    forest
        .iter()
        .map(|comment| 1 + count(&comment.replies))
        .sum()
}

/// Flips `user`'s like on the target comment.
#[must_use]
pub fn toggle_like(
    forest: Vec<Comment>,
    target: Id<CommentMarker>,
    user: Id<UserMarker>,
) -> Vec<Comment> {
    forest
        .into_iter()
        .map(|mut comment| {
            if comment.id == target {
                comment.likes.toggle(user);
            } else {
                comment.replies = toggle_like(mem::take(&mut comment.replies), target, user);
            }
            comment
        })
        .collect()
}

/// Appends `reply` as the newest reply of the target comment.
#[must_use]
pub fn add_reply(forest: Vec<Comment>, parent: Id<CommentMarker>, reply: Comment) -> Vec<Comment> {
    let mut pending = Some(reply);
    insert_reply(forest, parent, &mut pending)
}

fn insert_reply(
    forest: Vec<Comment>,
    parent: Id<CommentMarker>,
    pending: &mut Option<Comment>,
) -> Vec<Comment> {
    forest
        .into_iter()
        .map(|mut comment| {
            if pending.is_none() {
                return comment;
            }

            if comment.id == parent {
                comment.replies.extend(pending.take());
            } else {
                comment.replies = insert_reply(mem::take(&mut comment.replies), parent, pending);
            }
            comment
        })
        .collect()
}

/// Removes the target comment together with all of its replies.
///
/// Replies of the removed comment are dropped, never re-attached.
#[must_use]
pub fn delete(forest: Vec<Comment>, target: Id<CommentMarker>) -> Vec<Comment> {
    forest
        .into_iter()
        .filter(|comment| comment.id != target)
        .map(|mut comment| {
            comment.replies = delete(mem::take(&mut comment.replies), target);
            comment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        forest::{add_reply, count, delete, find, toggle_like},
        model::{
            Id,
            comment::{Comment, CommentMarker},
            content::Content,
            likes::Likes,
            user::{Author, UserHandle},
        },
    };
    use time::macros::utc_datetime;

    fn comment(id: u64, replies: Vec<Comment>) -> Comment {
        Comment {
            id: Id::from(id),
            author: Author {
                id: Id::from(1000 + id),
                handle: UserHandle::new(format!("user{id}")).unwrap(),
            },
            content: Content::new(format!("comment {id}")).unwrap(),
            created_at: utc_datetime!(2025-06-01 12:00),
            likes: Likes::new(),
            replies,
        }
    }

    /// 1 -> (11 -> 12, 13), 2 -> 21
    fn sample() -> Vec<Comment> {
        vec![
            comment(1, vec![comment(11, vec![comment(12, vec![])]), comment(13, vec![])]),
            comment(2, vec![comment(21, vec![])]),
        ]
    }

    fn ids(forest: &[Comment]) -> Vec<u64> {
        forest
            .iter()
            .flat_map(|comment| {
                std::iter::once(u64::from(comment.id)).chain(ids(&comment.replies))
            })
            .collect()
    }

    fn assert_likes_match(forest: &[Comment]) {
        for comment in forest {
            assert_eq!(comment.likes.count(), comment.likes.iter().count());
            assert_likes_match(&comment.replies);
        }
    }

    #[test]
    fn find_and_count() {
        let forest = sample();

        assert_eq!(count(&forest), 6);
        assert_eq!(count(&[]), 0);
        assert_eq!(find(&forest, Id::from(12)).unwrap().id, Id::from(12));
        assert_eq!(find(&forest, Id::from(21)).unwrap().id, Id::from(21));
        assert!(find(&forest, Id::from(99)).is_none());
    }

    #[test]
    fn toggle_like_is_an_involution() {
        let before = sample();
        let user = Id::from(7);

        for target in ids(&before) {
            let target = Id::<CommentMarker>::from(target);

            let liked = toggle_like(before.clone(), target, user);
            let node = find(&liked, target).unwrap();
            assert!(node.likes.contains(user));
            assert_eq!(node.likes.count(), 1);

            let restored = toggle_like(liked, target, user);
            assert_eq!(restored, before);
        }
    }

    #[test]
    fn toggle_like_only_touches_target() {
        let forest = toggle_like(sample(), Id::from(12), Id::from(7));

        for id in ids(&forest) {
            let node = find(&forest, Id::from(id)).unwrap();
            assert_eq!(node.likes.count(), usize::from(id == 12));
        }
    }

    #[test]
    fn likes_stay_in_step_across_operations() {
        let mut forest = sample();
        forest = toggle_like(forest, Id::from(11), Id::from(7));
        forest = toggle_like(forest, Id::from(11), Id::from(8));
        forest = add_reply(forest, Id::from(11), comment(14, vec![]));
        forest = toggle_like(forest, Id::from(14), Id::from(7));
        forest = toggle_like(forest, Id::from(11), Id::from(7));
        forest = delete(forest, Id::from(13));

        assert_likes_match(&forest);
        assert_eq!(find(&forest, Id::from(11)).unwrap().likes.count(), 1);
        assert_eq!(find(&forest, Id::from(14)).unwrap().likes.count(), 1);
    }

    #[test]
    fn nested_reply() {
        let forest = add_reply(vec![comment(1, vec![])], Id::from(1), comment(101, vec![]));

        assert_eq!(forest, vec![comment(1, vec![comment(101, vec![])])]);
    }

    #[test]
    fn replies_are_appended_in_submission_order() {
        let mut forest = sample();
        forest = add_reply(forest, Id::from(1), comment(14, vec![]));
        forest = add_reply(forest, Id::from(1), comment(15, vec![]));

        let replies: Vec<_> = forest[0]
            .replies
            .iter()
            .map(|reply| u64::from(reply.id))
            .collect();
        assert_eq!(replies, [11, 13, 14, 15]);
    }

    #[test]
    fn reply_leaves_other_branches_alone() {
        let before = sample();
        let forest = add_reply(before.clone(), Id::from(12), comment(120, vec![]));

        assert_eq!(forest[1], before[1]);
        assert_eq!(forest[0].replies[1], before[0].replies[1]);
        assert_eq!(
            forest[0].replies[0].replies[0].replies,
            vec![comment(120, vec![])]
        );
    }

    #[test]
    fn delete_mid_tree() {
        let forest = vec![comment(
            1,
            vec![comment(101, vec![comment(102, vec![])])],
        )];

        assert_eq!(delete(forest, Id::from(101)), vec![comment(1, vec![])]);
    }

    #[test]
    fn delete_cascades_subtree() {
        let forest = delete(sample(), Id::from(1));

        assert_eq!(ids(&forest), [2, 21]);
        for gone in [1, 11, 12, 13] {
            assert!(find(&forest, Id::from(gone)).is_none());
        }
    }

    #[test]
    fn delete_keeps_siblings() {
        let forest = delete(sample(), Id::from(11));

        assert_eq!(ids(&forest), [1, 13, 2, 21]);
    }

    #[test]
    fn missing_target_is_a_no_op() {
        let missing = Id::from(404);

        assert_eq!(toggle_like(sample(), missing, Id::from(7)), sample());
        assert_eq!(add_reply(sample(), missing, comment(14, vec![])), sample());
        assert_eq!(delete(sample(), missing), sample());
        assert_eq!(delete(Vec::new(), missing), Vec::new());
    }
}
