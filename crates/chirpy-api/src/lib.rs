pub mod admin;
pub mod app;
pub mod chirps;
pub mod convert;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod profanity;
pub mod state;
pub mod users;

pub use app::{StaticDirs, router};
pub use state::{AppState, AppStateInner, Platform};
