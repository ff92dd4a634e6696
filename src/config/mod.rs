//! Configuration module for Sumi-Notify
//!
//! This module derives and validates the operating configuration (site origin,
//! IndexNow key, key location, notifier endpoint, sitemap entry point) from
//! environment-style key/value input. Loading never touches the network.
//!
//! # Example
//!
//! ```no_run
//! use sumi_notify::config::load_config;
//!
//! let config = load_config().unwrap();
//! println!("Submitting for host: {}", config.site_host);
//! ```

mod parser;
mod source;
mod types;
mod validation;

// Re-export types
pub use source::{ConfigProvider, ConfigSource, EnvProvider};
pub use types::{Config, SettingsFile, DEFAULT_NOTIFIER_ENDPOINT};

// Re-export parser functions
pub use parser::{load_config, load_config_from, load_settings_file};
