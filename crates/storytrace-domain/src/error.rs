//! Validation errors raised at the ingestion boundary

use thiserror::Error;

/// Errors raised while turning scraper output into domain records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No articles were supplied to a trace request
    #[error("Article list is empty")]
    EmptyArticleList,

    /// URL is missing, unparseable, or not an absolute http(s) URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL as supplied
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Title is missing or blank
    #[error("Article '{url}' has no title")]
    MissingTitle {
        /// URL of the article
        url: String,
    },

    /// Publish date is present but not a recognized ISO format
    #[error("Article '{url}' has an unparseable publish date '{value}'")]
    InvalidDate {
        /// URL of the article
        url: String,
        /// The raw date value
        value: String,
    },
}
