//! Configuration module
//!
//! The crawler runs without any configuration file. A TOML file passed with
//! `--config` can override the user agent, add a request timeout, adjust the
//! markup assumptions used during extraction, and declare further Wikipedia
//! language editions.
//!
//! # Example
//!
//! ```no_run
//! use wiki_category_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Stripping classes: {:?}", config.extraction.strip_classes);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, ExtractionConfig, HttpConfig, LanguageEntry, UserAgentConfig, LISTING_CONTAINER,
    LISTING_ITEM, PARAGRAPH, STRIP_CLASSES, STRIP_TAGS,
};

pub use parser::{load_config, load_or_default, parse_config};
