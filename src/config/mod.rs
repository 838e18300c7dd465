//! Configuration loading and management.
//!
//! This module provides functionality to load the site settings and the
//! organization directory from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use meetup_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/fwf").unwrap();
//! println!("Loaded site: {}", loader.settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DirectoryFile, IcsSettings, SiteConfig, SiteSettings};
