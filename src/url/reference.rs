use percent_encoding::percent_decode_str;
use std::fmt;

/// A percent-decoded relative link to one member article, e.g. `/wiki/A*_search_algorithm`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleRef(String);

impl ArticleRef {
    /// Decodes a raw `href` taken from a category listing
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use wiki_category_crawler::url::ArticleRef;
    ///
    /// let article = ArticleRef::from_href("/wiki/Dijkstra%27s_algorithm");
    /// assert_eq!(article.as_str(), "/wiki/Dijkstra's_algorithm");
    /// ```
    pub fn from_href(href: &str) -> Self {
        Self(percent_decode_str(href).decode_utf8_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final `/`-separated segment, used to name PDF renditions
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
