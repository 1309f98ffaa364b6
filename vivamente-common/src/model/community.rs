use crate::model::{Id, user::UserMarker};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};
use thiserror::Error;

pub const GENERAL_AUDIENCE: &str = "general";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommunityMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Depression,
    Anxiety,
    Adhd,
    Asd,
    Other,
}

impl Condition {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Condition::Depression => "Depression",
            Condition::Anxiety => "Anxiety",
            Condition::Adhd => "ADHD",
            Condition::Asd => "ASD",
            Condition::Other => "Other",
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Community {
    pub id: Id<CommunityMarker>,
    pub name: String,
    pub description: String,
    pub condition: Condition,
    pub creator: Id<UserMarker>,
    pub members_count: u32,
    pub tags: Vec<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct CreateCommunity {
    pub name: String,
    pub description: String,
    pub condition: Condition,
}

impl Community {
    /// A freshly created community. Its creator is the only member and its
    /// condition is its only tag.
    #[must_use]
    pub fn new(id: Id<CommunityMarker>, create: CreateCommunity, creator: Id<UserMarker>) -> Self {
        Self {
            id,
            name: create.name,
            description: create.description,
            condition: create.condition,
            creator,
            members_count: 1,
            tags: vec![create.condition.to_string()],
        }
    }
}

/// Where a post is published.
///
/// General posts are visible to everyone; community posts only to members.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum Audience {
    #[default]
    General,
    Community(Id<CommunityMarker>),
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("Invalid audience {0:?}: {1}")]
pub struct InvalidAudienceError(String, ParseIntError);

impl Audience {
    #[must_use]
    pub fn display_name(self, communities: &[Community]) -> String {
        match self {
            Audience::General => "General".to_owned(),
            Audience::Community(id) => communities
                .iter()
                .find(|community| community.id == id)
                .map_or_else(|| format!("Group {id}"), |community| community.name.clone()),
        }
    }
}

impl Display for Audience {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::General => f.write_str(GENERAL_AUDIENCE),
            Audience::Community(id) => Display::fmt(id, f),
        }
    }
}

impl FromStr for Audience {
    type Err = InvalidAudienceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GENERAL_AUDIENCE {
            return Ok(Audience::General);
        }

        u64::from_str(s)
            .map(|id| Audience::Community(id.into()))
            .map_err(|err| InvalidAudienceError(s.to_owned(), err))
    }
}
