//! cashflow-config
//!
//! Persistent user preferences for the dashboard: locale, currency, and the
//! limits that bound the projection engine. Owns the Config data structure
//! plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, ProjectionConfig};
