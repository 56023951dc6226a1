//! URL handling module
//!
//! This module knows the shape of every endpoint the crawler touches: the
//! category listing, article pages and the PDF renderer of a Wikipedia
//! language edition. It also owns the decoding of article references found in
//! category listings.

mod edition;
mod reference;

pub use edition::{available_languages, resolve_edition, Edition, DEFAULT_LANGUAGE};
pub use reference::ArticleRef;
