use crate::{
    persistence::Persistence,
    store::{Result, StoreError, stamp},
};
use tracing::{debug, warn};
use vivamente_common::{
    model::{
        Id, VivamenteSnowflakeGenerator,
        community::{Community, CommunityMarker, CreateCommunity},
        user::{Membership, User},
    },
    snowflake::{ProcessId, WorkerId},
};

/// Owns the community collection and writes every change through to
/// persistence before it is applied in memory.
#[derive(Debug)]
pub struct CommunityStore<P> {
    persistence: P,
    communities: Vec<Community>,
    snowflake_generator: VivamenteSnowflakeGenerator,
}

impl<P: Persistence<Item = Community>> CommunityStore<P> {
    /// Loads the stored collection, or saves and uses `seed` if nothing was
    /// stored yet.
    pub fn open_or_seed<F>(
        mut persistence: P,
        worker_id: WorkerId,
        process_id: ProcessId,
        seed: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Vec<Community>,
    {
        let communities = if let Some(communities) = persistence.load()? {
            communities
        } else {
            let communities = seed();
            debug!(count = communities.len(), "Seeding community collection");
            persistence.save(&communities)?;
            communities
        };

        Ok(Self {
            persistence,
            communities,
            snowflake_generator: VivamenteSnowflakeGenerator::new(worker_id, process_id),
        })
    }

    #[must_use]
    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    #[must_use]
    pub fn community(&self, id: Id<CommunityMarker>) -> Option<&Community> {
        self.communities.iter().find(|community| community.id == id)
    }

    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Adds the community in front of the others, with `creator` as its
    /// first member.
    pub fn create_community(
        &mut self,
        create: CreateCommunity,
        creator: &mut User,
    ) -> Result<Id<CommunityMarker>> {
        let id = stamp(&mut self.snowflake_generator)?.0.into();

        let mut communities = Vec::with_capacity(self.communities.len() + 1);
        communities.push(Community::new(id, create, creator.id));
        communities.extend(self.communities.iter().cloned());
        self.commit(communities)?;

        creator.joined_communities.insert(id);
        debug!(community = %id, creator = %creator.id, "Created community");
        Ok(id)
    }

    /// Joins or leaves the community, adjusting its member count.
    ///
    /// `user` is only changed once the new count has been saved.
    pub fn toggle_membership(
        &mut self,
        id: Id<CommunityMarker>,
        user: &mut User,
    ) -> Result<Membership> {
        let mut communities = self.communities.clone();
        let community = communities
            .iter_mut()
            .find(|community| community.id == id)
            .ok_or_else(|| {
                let err = StoreError::CommunityNotFound(id);
                warn!(error = %err, "Target community vanished");
                err
            })?;

        let mut updated = user.clone();
        let membership = updated.toggle_membership(community);
        self.commit(communities)?;

        *user = updated;
        debug!(community = %id, user = %user.id, ?membership, "Changed membership");
        Ok(membership)
    }

    fn commit(&mut self, communities: Vec<Community>) -> Result<()> {
        self.persistence.save(&communities)?;
        self.communities = communities;
        Ok(())
    }
}
