pub mod communities;
pub mod persistence;
mod record;
pub mod store;
