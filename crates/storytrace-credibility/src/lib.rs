//! Storytrace Credibility
//!
//! Rule-based credibility scoring for news articles.
//!
//! # Overview
//!
//! Each article starts from a neutral base and collects additive adjustments:
//!
//! | Factor | Condition | Adjustment |
//! |--------|-----------|------------|
//! | Domain reputation | trusted list | +3.0 |
//! | Domain reputation | blacklist | -4.0 |
//! | Author | present / missing | +1.0 / -1.0 |
//! | Recency | within 7 days / older than a year or undated | +1.0 / -1.0 |
//! | Sensationalism | per distinct flagged term, capped at 3 | -1.0 |
//!
//! The total is clamped to [0, 10] and bucketed red (< 4), yellow (< 7), or
//! green. The `strict` preset adds suspicious-domain and punctuation checks.
//!
//! Tables and weights live in [`ScoringConfig`], which is injected at
//! construction and can be loaded from TOML:
//!
//! ```toml
//! trusted_domains = ["reuters.com", "apnews.com"]
//! blacklist_domains = ["rumor-mill.net"]
//! penalize_excessive_punctuation = true
//!
//! [weights]
//! base = 5.0
//! recent_window_days = 7
//! ```
//!
//! # Usage
//!
//! ```
//! use storytrace_credibility::{CredibilityReport, CredibilityScorer, ScoringConfig};
//! use storytrace_domain::ArticleRecord;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scorer = CredibilityScorer::new(ScoringConfig::default())?;
//! let articles = vec![
//!     ArticleRecord::new("https://fake-news.com/story", "SHOCKING claims")?,
//!     ArticleRecord::new("https://apnews.com/article/1", "Talks resume")?.with_author("Jane Doe"),
//! ];
//!
//! let scores = scorer.batch_score(&articles);
//! let report = CredibilityReport::from_scores(&scores);
//! assert_eq!(report.total, 2);
//! assert_eq!(report.least_credible.as_deref(), Some("https://fake-news.com/story"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod report;
mod scorer;
mod sensational;

pub use config::{DomainList, ScoringConfig, ScoringWeights};
pub use error::ScoringError;
pub use report::CredibilityReport;
pub use scorer::CredibilityScorer;
pub use sensational::SensationalMatcher;
