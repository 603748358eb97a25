pub mod dto;
pub mod loader;

pub use dto::{AppConfig, FetchSettings};
pub use loader::{load_config, validate_fetch_settings};
