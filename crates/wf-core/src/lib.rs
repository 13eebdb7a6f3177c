pub mod config;
pub mod exceptions;
mod macros;

pub mod fleet;
pub mod follow;
pub mod format;
pub mod mock;
pub mod models;
pub mod routes;
pub mod skills;
pub mod views;

// public api
pub use fleet::{Fleet, LocalEdits};
pub use follow::{LogFollow, ScrollBehavior};
pub use mock::MockData;
pub use routes::Route;
