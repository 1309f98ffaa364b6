use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use time::UtcDateTime;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vivamente_common::{
    model::{
        Id,
        community::Community,
        post::Post,
        user::{InvalidUserHandleError, User, UserHandle},
    },
    snowflake::{ProcessId, WorkerId},
};
use vivamente_feed::{
    controller::FeedController,
    ports::{AlwaysConfirm, TracingNotifier},
    seed,
};
use vivamente_store::{
    communities::CommunityStore,
    persistence::JsonFilePersistence,
    store::{PostStore, StoreError},
};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Invalid viewer name: {0}")]
    ViewerName(#[from] InvalidUserHandleError),
    #[error("Error opening a store: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    data_path: PathBuf,
    #[serde(default = "default_communities_path")]
    communities_path: PathBuf,
    viewer_id: u64,
    viewer_name: String,
    #[serde(default)]
    joined_communities: Vec<u64>,
    #[serde(default)]
    worker_id: WorkerId,
    #[serde(default)]
    process_id: ProcessId,
}

fn default_communities_path() -> PathBuf {
    PathBuf::from("communities.json")
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vivamente_feed=debug,vivamente_store=debug,vivamente_common=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let mut viewer = User::new(env.viewer_id.into(), UserHandle::new(env.viewer_name)?);
    viewer.joined_communities = env.joined_communities.into_iter().map(Id::from).collect();

    let communities = CommunityStore::open_or_seed(
        JsonFilePersistence::<Community>::new(env.communities_path),
        env.worker_id,
        env.process_id,
        seed::seed_communities,
    )?;
    let store = PostStore::open_or_seed(
        JsonFilePersistence::<Post>::new(env.data_path),
        env.worker_id,
        env.process_id,
        seed::seed_posts,
    )?;
    let controller = FeedController::new(store, viewer, TracingNotifier, AlwaysConfirm);

    print!(
        "{}",
        controller.render(communities.communities(), UtcDateTime::now())
    );

    Ok(())
}
