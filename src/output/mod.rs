//! Output module
//!
//! This module handles:
//! - Creating the output directory layout
//! - Naming and writing text and PDF artifacts
//! - Summarising what a crawl wrote

mod report;
mod writer;

pub use report::{print_report, ArticleFailure, CrawlReport};
pub use writer::{file_stem, OutputWriter, PDF_DIR};
