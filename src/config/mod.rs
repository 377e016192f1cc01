//! Configuration module for Sumi-Sitemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so a crawl can also run from defaults alone.
//!
//! # Example
//!
//! ```no_run
//! use sumi_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemap.toml")).unwrap();
//! println!("Following up to {} redirects", config.crawler.max_redirects);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, RobotsConfig, RobotsMode, UserAgentConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
