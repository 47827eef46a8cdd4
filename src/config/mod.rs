pub mod env;
mod loader;

pub use env::{AlertConfig, AppConfig, DirectoryConfig, HunterConfig};
pub use loader::load_config;
