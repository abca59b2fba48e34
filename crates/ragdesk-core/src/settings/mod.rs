//! User settings persisted under the `settings` key.

mod model;
mod repository;
mod store;

pub use model::{ApiEndpointType, Settings, Theme};
pub use repository::SettingsRepository;
pub use store::SettingsStore;
