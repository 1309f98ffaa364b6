pub mod comment;
pub mod community;
pub mod content;
pub mod likes;
pub mod post;
pub mod user;

use crate::{
    model::{
        community::InvalidAudienceError, content::InvalidContentError, likes::InvalidLikesError,
        user::InvalidUserHandleError,
    },
    snowflake::{Epoch, Snowflake, SnowflakeGenerator},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;
use time::{UtcDateTime, error::ComponentRange, macros::utc_datetime};

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    UserHandle(#[from] InvalidUserHandleError),
    #[error(transparent)]
    Content(#[from] InvalidContentError),
    #[error(transparent)]
    Audience(#[from] InvalidAudienceError),
    #[error(transparent)]
    Likes(#[from] InvalidLikesError),
    #[error("Timestamp out of range: {0}")]
    Timestamp(#[from] ComponentRange),
    #[error("Id {0} is used by more than one entry.")]
    DuplicateId(VivamenteSnowflake),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct VivamenteEpoch;
impl Epoch for VivamenteEpoch {
    const EPOCH_TIME: UtcDateTime = utc_datetime!(2025-01-01 00:00);
}

pub type VivamenteSnowflake = Snowflake<VivamenteEpoch>;
pub type VivamenteSnowflakeGenerator = SnowflakeGenerator<VivamenteEpoch>;

/// Identifier of an entity of the kind named by `Marker`.
///
/// Markers keep post, comment, user and community ids from being mixed up.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id<Marker>(VivamenteSnowflake, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(snowflake: VivamenteSnowflake) -> Self {
        Self(snowflake, PhantomData)
    }

    #[must_use]
    pub fn snowflake(self) -> VivamenteSnowflake {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<VivamenteSnowflake> for Id<Marker> {
    fn from(value: VivamenteSnowflake) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for VivamenteSnowflake {
    fn from(value: Id<Marker>) -> Self {
        value.0
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(VivamenteSnowflake::new(value))
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.snowflake().get()
    }
}
