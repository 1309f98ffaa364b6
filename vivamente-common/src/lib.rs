pub mod collection;
pub mod forest;
pub mod model;
pub mod snowflake;
pub mod util;
