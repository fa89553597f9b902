pub mod history;
pub mod platform;
pub mod provider;
pub mod snapshot;
