//! spend-config
//!
//! Persistent user preferences, the predefined category list, and
//! application directory resolution.

pub mod categories;
pub mod error;
pub mod manager;
pub mod model;
pub mod paths;

pub use categories::{load_predefined_categories, DEFAULT_CATEGORIES};
pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
