//! Configuration for credibility scoring
//!
//! Reputation tables, sensational vocabulary, and factor weights are all
//! injected here; the scorer holds no global state.

use crate::ScoringError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A list of domains where each entry also covers its subdomains
///
/// # Examples
///
/// ```
/// use storytrace_credibility::DomainList;
///
/// let list = DomainList::new(["reuters.com"]);
/// assert!(list.matches("reuters.com"));
/// assert!(list.matches("uk.reuters.com"));
/// assert!(!list.matches("notreuters.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainList(Vec<String>);

impl DomainList {
    /// Build a list from domain names
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(domains.into_iter().map(Into::into).collect())
    }

    /// Whether `domain` is an entry or a subdomain of one (ASCII case-insensitive)
    pub fn matches(&self, domain: &str) -> bool {
        let domain = domain.to_ascii_lowercase();
        self.0.iter().any(|entry| {
            let entry = entry.trim().to_ascii_lowercase();
            domain == entry
                || domain
                    .strip_suffix(entry.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Entries in configured order
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Add an entry
    pub fn push(&mut self, domain: impl Into<String>) {
        self.0.push(domain.into());
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Additive adjustments applied by the scorer
///
/// Penalties are stored as positive magnitudes and subtracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Starting score
    pub base: f64,
    /// Domain on the trusted list
    pub trusted_bonus: f64,
    /// Domain on the blacklist
    pub blacklist_penalty: f64,
    /// Author present
    pub author_bonus: f64,
    /// Author missing
    pub missing_author_penalty: f64,
    /// Published within `recent_window_days`
    pub recent_bonus: f64,
    /// Older than `stale_after_days`, or undated
    pub stale_penalty: f64,
    /// Per distinct sensational term
    pub sensational_penalty_per_term: f64,
    /// Upper bound on the total sensational penalty
    pub sensational_penalty_cap: f64,
    /// Age in days still counted as recent (inclusive)
    pub recent_window_days: i64,
    /// Age in days beyond which an article is stale
    pub stale_after_days: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 5.0,
            trusted_bonus: 3.0,
            blacklist_penalty: 4.0,
            author_bonus: 1.0,
            missing_author_penalty: 1.0,
            recent_bonus: 1.0,
            stale_penalty: 1.0,
            sensational_penalty_per_term: 1.0,
            sensational_penalty_cap: 3.0,
            recent_window_days: 7,
            stale_after_days: 365,
        }
    }
}

impl ScoringWeights {
    fn validate(&self) -> Result<(), ScoringError> {
        let fields = [
            ("base", self.base),
            ("trusted_bonus", self.trusted_bonus),
            ("blacklist_penalty", self.blacklist_penalty),
            ("author_bonus", self.author_bonus),
            ("missing_author_penalty", self.missing_author_penalty),
            ("recent_bonus", self.recent_bonus),
            ("stale_penalty", self.stale_penalty),
            ("sensational_penalty_per_term", self.sensational_penalty_per_term),
            ("sensational_penalty_cap", self.sensational_penalty_cap),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::Config(format!(
                    "weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.recent_window_days < 0 || self.stale_after_days < 0 {
            return Err(ScoringError::Config(
                "recent_window_days and stale_after_days must be non-negative".to_string(),
            ));
        }
        if self.recent_window_days > self.stale_after_days {
            return Err(ScoringError::Config(format!(
                "recent_window_days ({}) must not exceed stale_after_days ({})",
                self.recent_window_days, self.stale_after_days
            )));
        }
        Ok(())
    }
}

/// Configuration for the credibility scorer
///
/// # Examples
///
/// ```
/// use storytrace_credibility::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.weights.base, 5.0);
/// assert!(config.suspicious_domain_patterns.is_empty());
///
/// let strict = ScoringConfig::strict();
/// assert!(strict.penalize_excessive_punctuation);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Curated reputable outlets
    pub trusted_domains: DomainList,

    /// Static blacklist used by `batch_score`
    pub blacklist_domains: DomainList,

    /// Sensational vocabulary, matched case-insensitively on word boundaries
    pub sensational_terms: Vec<String>,

    /// Regexes flagging throwaway or self-declared fake domains
    pub suspicious_domain_patterns: Vec<String>,

    /// Applied once when any suspicious pattern matches
    pub suspicious_domain_penalty: f64,

    /// Penalize more than one `!` or `?` in the title
    pub penalize_excessive_punctuation: bool,

    /// Applied when the title has excessive punctuation
    pub punctuation_penalty: f64,

    /// Factor weights
    pub weights: ScoringWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            trusted_domains: DomainList::new([
                "bbc.com",
                "bbc.co.uk",
                "reuters.com",
                "apnews.com",
                "npr.org",
                "theguardian.com",
                "nytimes.com",
                "washingtonpost.com",
                "wsj.com",
                "economist.com",
                "ft.com",
                "bloomberg.com",
                "cnn.com",
                "abcnews.go.com",
                "cbsnews.com",
                "nbcnews.com",
                "pbs.org",
                "time.com",
                "newsweek.com",
            ]),
            blacklist_domains: DomainList::new([
                "fake-news.com",
                "conspiracy-site.org",
                "clickbait-news.net",
                "hoax-stories.com",
                "unreliable-source.info",
                "propaganda-daily.com",
            ]),
            sensational_terms: [
                "BREAKING",
                "SHOCKING",
                "UNBELIEVABLE",
                "YOU WON'T BELIEVE",
                "EXPOSED",
                "CONSPIRACY",
                "SECRET",
                "REVEALED",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            suspicious_domain_patterns: Vec::new(),
            suspicious_domain_penalty: 2.0,
            penalize_excessive_punctuation: false,
            punctuation_penalty: 1.0,
            weights: ScoringWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Strict preset: default table plus domain-pattern and punctuation checks
    pub fn strict() -> Self {
        Self {
            suspicious_domain_patterns: [
                r"\.xyz$",
                r"\.tk$",
                r"\.ml$",
                r"\d{2,}",
                r"(fake|hoax|satire|parody)",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            penalize_excessive_punctuation: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.weights.validate()?;

        for (name, value) in [
            ("suspicious_domain_penalty", self.suspicious_domain_penalty),
            ("punctuation_penalty", self.punctuation_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.sensational_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(ScoringError::Config(
                "sensational_terms must not contain empty entries".to_string(),
            ));
        }

        let lists = [
            ("trusted_domains", &self.trusted_domains),
            ("blacklist_domains", &self.blacklist_domains),
        ];
        for (name, list) in lists {
            if list.entries().iter().any(|d| d.trim().is_empty()) {
                return Err(ScoringError::Config(format!(
                    "{} must not contain empty entries",
                    name
                )));
            }
        }

        for pattern in &self.suspicious_domain_patterns {
            Regex::new(pattern).map_err(|e| ScoringError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScoringError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ScoringError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ScoringError> {
        toml::to_string_pretty(self)
            .map_err(|e| ScoringError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.weights.base, 5.0);
        assert_eq!(config.weights.trusted_bonus, 3.0);
        assert_eq!(config.weights.blacklist_penalty, 4.0);
        assert_eq!(config.weights.sensational_penalty_cap, 3.0);
        assert_eq!(config.weights.recent_window_days, 7);
        assert_eq!(config.weights.stale_after_days, 365);
        assert_eq!(config.sensational_terms.len(), 8);
        assert!(!config.penalize_excessive_punctuation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = ScoringConfig::strict();
        assert_eq!(config.suspicious_domain_patterns.len(), 5);
        assert!(config.penalize_excessive_punctuation);
        assert_eq!(config.weights, ScoringWeights::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_domain_list_suffix_matching() {
        let list = DomainList::new(["bbc.co.uk", "Example.COM"]);
        assert!(list.matches("bbc.co.uk"));
        assert!(list.matches("news.bbc.co.uk"));
        assert!(list.matches("example.com"));
        assert!(!list.matches("co.uk"));
        assert!(!list.matches("myexample.com"));
        assert!(!DomainList::default().matches("example.com"));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut config = ScoringConfig::default();
        config.weights.blacklist_penalty = -4.0;
        assert!(matches!(config.validate(), Err(ScoringError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_entries() {
        let mut config = ScoringConfig::default();
        config.sensational_terms.push("  ".to_string());
        assert!(config.validate().is_err());

        let mut config = ScoringConfig::default();
        config.blacklist_domains.push("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_regex() {
        let mut config = ScoringConfig::default();
        config.suspicious_domain_patterns.push("(unclosed".to_string());
        match config.validate() {
            Err(ScoringError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_partial_override() {
        let config = ScoringConfig::from_toml(
            r#"
            blacklist_domains = ["rumor-mill.net"]

            [weights]
            base = 6.0
            "#,
        )
        .unwrap();

        assert_eq!(config.weights.base, 6.0);
        assert_eq!(config.weights.trusted_bonus, 3.0);
        assert_eq!(config.blacklist_domains.entries(), ["rumor-mill.net"]);
        assert!(config.trusted_domains.matches("reuters.com"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ScoringConfig::strict();
        let text = config.to_toml().unwrap();
        assert_eq!(ScoringConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let config = ScoringConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScoringConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
