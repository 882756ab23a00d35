//! Credibility score value type and color buckets
//!
//! The bucket boundaries are read by the rendering layer's color scale and
//! must not move: `score >= 7` is green, `4 <= score < 7` is yellow, and
//! anything below 4 is red.

use serde::{Deserialize, Serialize};

/// Lowest score in the green bucket
pub const GREEN_THRESHOLD: f64 = 7.0;

/// Lowest score in the yellow bucket
pub const YELLOW_THRESHOLD: f64 = 4.0;

/// Upper bound of the score range
pub const MAX_SCORE: f64 = 10.0;

/// Red/yellow/green classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    /// score < 4
    Red,
    /// 4 <= score < 7
    Yellow,
    /// score >= 7
    Green,
}

impl ColorBucket {
    /// Classify a score
    ///
    /// # Examples
    ///
    /// ```
    /// use storytrace_domain::ColorBucket;
    ///
    /// assert_eq!(ColorBucket::from_score(7.0), ColorBucket::Green);
    /// assert_eq!(ColorBucket::from_score(6.999), ColorBucket::Yellow);
    /// assert_eq!(ColorBucket::from_score(3.999), ColorBucket::Red);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= GREEN_THRESHOLD {
            ColorBucket::Green
        } else if score >= YELLOW_THRESHOLD {
            ColorBucket::Yellow
        } else {
            ColorBucket::Red
        }
    }

    /// Lowercase name used in payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBucket::Red => "red",
            ColorBucket::Yellow => "yellow",
            ColorBucket::Green => "green",
        }
    }

    /// Risk label shown next to the color
    pub fn risk_level(&self) -> &'static str {
        match self {
            ColorBucket::Red => "High Risk",
            ColorBucket::Yellow => "Medium Risk",
            ColorBucket::Green => "Low Risk",
        }
    }
}

/// How the article's domain was classified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainReputation {
    /// On the trusted list
    Trusted,
    /// On the blacklist
    Blacklisted,
    /// On neither list
    #[default]
    Unknown,
}

/// Per-factor verdicts behind a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    /// Trusted, blacklisted, or neither
    pub domain_reputation: DomainReputation,
    /// A plausible byline was attributed (two or more words, no digits)
    pub author_verified: bool,
    /// Published within the recency window; `None` when the date is unknown
    pub is_recent: Option<bool>,
}

/// Credibility rating for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityScore {
    /// Article URL
    pub url: String,

    /// Article domain
    pub domain: String,

    /// Score in [0, 10], one decimal
    pub score: f64,

    /// Warnings and notable factors, in evaluation order
    pub flags: Vec<String>,

    /// Bucket derived from `score`
    pub color: ColorBucket,

    /// Factor verdicts
    #[serde(default)]
    pub details: ScoreDetails,
}

impl CredibilityScore {
    /// Build a score from a raw additive total
    ///
    /// The total is clamped to [0, 10] and rounded to one decimal before the
    /// color is derived. A NaN total counts as 0.
    pub fn new(url: String, domain: String, raw_score: f64, flags: Vec<String>) -> Self {
        let clamped = if raw_score.is_nan() {
            0.0
        } else {
            raw_score.clamp(0.0, MAX_SCORE)
        };
        let score = (clamped * 10.0).round() / 10.0;

        Self {
            url,
            domain,
            score,
            flags,
            color: ColorBucket::from_score(score),
            details: ScoreDetails::default(),
        }
    }

    /// Attach the factor verdicts
    pub fn with_details(mut self, details: ScoreDetails) -> Self {
        self.details = details;
        self
    }

    /// Risk label for the bucket
    pub fn risk_level(&self) -> &'static str {
        self.color.risk_level()
    }

    /// Whether this article falls in the red bucket
    pub fn is_high_risk(&self) -> bool {
        self.color == ColorBucket::Red
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any raw total yields a score in range with a consistent bucket
        #[test]
        fn test_score_range(raw in -100.0f64..100.0) {
            let s = CredibilityScore::new("u".into(), "d".into(), raw, vec![]);
            prop_assert!(s.score >= 0.0 && s.score <= MAX_SCORE);
            prop_assert_eq!(s.color, ColorBucket::from_score(s.score));
            prop_assert!(((s.score * 10.0).round() - s.score * 10.0).abs() < 1e-9);
        }
    }
}
