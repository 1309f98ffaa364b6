use crate::model::{Id, user::UserMarker};
use std::collections::BTreeSet;
use thiserror::Error;

/// Set of users liking a post or comment.
///
/// The like count is the size of the set, so it can never drift from the
/// liker list.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Likes(BTreeSet<Id<UserMarker>>);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum LikeChange {
    Liked,
    Unliked,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum InvalidLikesError {
    #[error("Like count {count} does not match the {likers} recorded likers")]
    CountMismatch { count: u64, likers: usize },
    #[error("User {0} liked more than once")]
    DuplicateLiker(Id<UserMarker>),
}

impl Likes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a liker set from its stored count and liker list.
    pub fn from_stored(
        count: u64,
        liked_by: impl IntoIterator<Item = Id<UserMarker>>,
    ) -> Result<Self, InvalidLikesError> {
        let mut likers = BTreeSet::new();
        for user in liked_by {
            if !likers.insert(user) {
                return Err(InvalidLikesError::DuplicateLiker(user));
            }
        }

        if u64::try_from(likers.len()) == Ok(count) {
            Ok(Self(likers))
        } else {
            Err(InvalidLikesError::CountMismatch {
                count,
                likers: likers.len(),
            })
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, user: Id<UserMarker>) -> bool {
        self.0.contains(&user)
    }

    pub fn toggle(&mut self, user: Id<UserMarker>) -> LikeChange {
        if self.0.remove(&user) {
            LikeChange::Unliked
        } else {
            self.0.insert(user);
            LikeChange::Liked
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Id<UserMarker>> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Id<UserMarker>> for Likes {
    fn from_iter<T: IntoIterator<Item = Id<UserMarker>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
