//! Shared bootstrap utilities for game front-ends.
//!
//! Provides configuration loading, logging setup, the HTTP item catalog, and
//! runtime assembly that can be reused by any presentation layer.
pub mod builder;
pub mod catalog;
pub mod config;
pub mod logging;

pub use builder::{Bootstrap, SessionSetup};
pub use catalog::{HttpItemCatalog, item_from_payload};
pub use config::{BootstrapConfig, DEFAULT_CATALOG_URL};
pub use logging::setup_logging;
