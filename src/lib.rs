//! Brevo marketing API exposed as host actions and paginated sync tables.

pub mod actions;
pub mod brevo_client;
pub mod config;
pub mod types;

pub use actions::{ActionRequest, ActionRunner};
pub use brevo_client::{ApiKey, BrevoClient};
pub use config::Config;
pub use types::BrevoError;
