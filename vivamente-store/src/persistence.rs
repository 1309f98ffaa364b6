use crate::record::{CommunityRecord, PostRecord, unique_ids};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs,
    io::{self, ErrorKind},
    marker::PhantomData,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;
use vivamente_common::model::{ModelValidationError, community::Community, post::Post};

pub type Result<T, E = PersistenceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Accessing {path} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The stored collection is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("A stored entry was invalid: {0}")]
    Data(#[from] ModelValidationError),
}

/// Where a collection lives between sessions.
///
/// Both calls move the whole collection; there are no partial writes.
pub trait Persistence {
    type Item;

    /// `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Self::Item>>>;

    fn save(&mut self, items: &[Self::Item]) -> Result<()>;
}

/// Keeps the collection in process memory.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MemoryPersistence<T> {
    stored: Option<Vec<T>>,
}

impl<T> Default for MemoryPersistence<T> {
    fn default() -> Self {
        Self { stored: None }
    }
}

impl<T> MemoryPersistence<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            stored: Some(items),
        }
    }

    #[must_use]
    pub fn stored(&self) -> Option<&[T]> {
        self.stored.as_deref()
    }
}

impl<T: Clone> Persistence for MemoryPersistence<T> {
    type Item = T;

    fn load(&self) -> Result<Option<Vec<T>>> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, items: &[T]) -> Result<()> {
        self.stored = Some(items.to_vec());
        Ok(())
    }
}

/// Stores a collection of `T` as a single JSON document.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct JsonFilePersistence<T> {
    path: PathBuf,
    phantom_data: PhantomData<T>,
}

impl<T> JsonFilePersistence<T> {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            phantom_data: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load_records<R>(&self) -> Result<Option<Vec<R>>>
    where
        R: DeserializeOwned,
    {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Nothing stored yet");
                return Ok(None);
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let records: Vec<R> = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), count = records.len(), "Loaded collection");
        Ok(Some(records))
    }

    fn save_records<R>(&self, records: &[R]) -> Result<()>
    where
        R: Serialize,
    {
        let json = serde_json::to_vec_pretty(records)?;

        // Write beside the target and rename over it so a crash never leaves
        // a half-written collection behind.
        let mut temporary = self.path.clone().into_os_string();
        temporary.push(".tmp");
        let temporary = PathBuf::from(temporary);

        fs::write(&temporary, json).map_err(|err| self.io_error(err))?;
        fs::rename(&temporary, &self.path).map_err(|err| self.io_error(err))?;

        debug!(path = %self.path.display(), count = records.len(), "Saved collection");
        Ok(())
    }
}

impl Persistence for JsonFilePersistence<Post> {
    type Item = Post;

    fn load(&self) -> Result<Option<Vec<Post>>> {
        let Some(records) = self.load_records::<PostRecord>()? else {
            return Ok(None);
        };
        unique_ids(records.iter().map(|record| record.id.snowflake()))?;

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Some(posts))
    }

    fn save(&mut self, posts: &[Post]) -> Result<()> {
        let records: Vec<_> = posts.iter().map(PostRecord::from).collect();
        self.save_records(&records)
    }
}

impl Persistence for JsonFilePersistence<Community> {
    type Item = Community;

    fn load(&self) -> Result<Option<Vec<Community>>> {
        let Some(records) = self.load_records::<CommunityRecord>()? else {
            return Ok(None);
        };
        unique_ids(records.iter().map(|record| record.id.snowflake()))?;

        let communities = records
            .into_iter()
            .map(Community::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Some(communities))
    }

    fn save(&mut self, communities: &[Community]) -> Result<()> {
        let records: Vec<_> = communities.iter().map(CommunityRecord::from).collect();
        self.save_records(&records)
    }
}
