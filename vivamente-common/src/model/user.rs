use crate::model::{
    Id,
    community::{Audience, Community, CommunityMarker, Condition},
};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::collections::BTreeSet;
use thiserror::Error;

pub const USER_HANDLE_MAX_LEN: usize = 50;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

/// The signed-in viewer as resolved by the session.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct User {
    pub id: Id<UserMarker>,
    pub handle: UserHandle,
    pub bio: String,
    pub conditions: BTreeSet<Condition>,
    pub joined_communities: BTreeSet<Id<CommunityMarker>>,
}

/// Snapshot of the writer stored alongside posts and comments.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Author {
    pub id: Id<UserMarker>,
    pub handle: UserHandle,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Membership {
    Joined,
    Left,
}

impl User {
    #[must_use]
    pub fn new(id: Id<UserMarker>, handle: UserHandle) -> Self {
        Self {
            id,
            handle,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn author(&self) -> Author {
        Author {
            id: self.id,
            handle: self.handle.clone(),
        }
    }

    /// Whether posts addressed to `audience` show up in this user's feed.
    #[must_use]
    pub fn can_see(&self, audience: Audience) -> bool {
        match audience {
            Audience::General => true,
            Audience::Community(id) => self.joined_communities.contains(&id),
        }
    }

    pub fn toggle_membership(&mut self, community: &mut Community) -> Membership {
        if self.joined_communities.remove(&community.id) {
            community.members_count = community.members_count.saturating_sub(1);
            Membership::Left
        } else {
            self.joined_communities.insert(community.id);
            community.members_count = community.members_count.saturating_add(1);
            Membership::Joined
        }
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct UserHandle(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The user handle is invalid: {0}")]
pub struct InvalidUserHandleError(String);

impl UserHandle {
    pub fn new(handle: String) -> Result<Self, InvalidUserHandleError> {
        if handle.chars().count() <= USER_HANDLE_MAX_LEN {
            Ok(UserHandle(handle))
        } else {
            Err(InvalidUserHandleError(handle))
        }
    }

    #[must_use]
    pub fn new_unchecked(handle: &str) -> Self {
        Self::new(handle.to_owned()).expect("User handle too long.")
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for UserHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        UserHandle::new(inner)
            .map_err(|err| Error::invalid_value(Unexpected::Str(&err.0), &"UserHandle"))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Id,
        community::{Audience, Community, Condition},
        user::{Membership, USER_HANDLE_MAX_LEN, User, UserHandle},
    };

    fn community(id: u64, members_count: u32) -> Community {
        Community {
            id: Id::from(id),
            name: format!("Community {id}"),
            description: String::new(),
            condition: Condition::Anxiety,
            creator: Id::from(99),
            members_count,
            tags: Vec::new(),
        }
    }

    #[test]
    fn handle_length() {
        assert!(UserHandle::new("a".repeat(USER_HANDLE_MAX_LEN)).is_ok());
        assert!(UserHandle::new("ä".repeat(USER_HANDLE_MAX_LEN)).is_ok());
        assert!(UserHandle::new("a".repeat(USER_HANDLE_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn membership_controls_visibility() {
        let mut user = User::new(Id::from(1), UserHandle::new("Ana".into()).unwrap());
        let mut anxiety = community(10, 0);

        assert!(user.can_see(Audience::General));
        assert!(!user.can_see(Audience::Community(anxiety.id)));

        assert_eq!(user.toggle_membership(&mut anxiety), Membership::Joined);
        assert_eq!(anxiety.members_count, 1);
        assert!(user.can_see(Audience::Community(anxiety.id)));

        assert_eq!(user.toggle_membership(&mut anxiety), Membership::Left);
        assert_eq!(anxiety.members_count, 0);
        assert!(!user.can_see(Audience::Community(anxiety.id)));
    }

    #[test]
    fn leaving_never_underflows_member_count() {
        let mut user = User::new(Id::from(1), UserHandle::default());
        let mut empty = community(10, 0);
        user.joined_communities.insert(empty.id);

        assert_eq!(user.toggle_membership(&mut empty), Membership::Left);
        assert_eq!(empty.members_count, 0);
    }
}
