//! Rule-based credibility scoring

use crate::{DomainList, ScoringConfig, ScoringError, SensationalMatcher};
use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;
use storytrace_domain::{ArticleRecord, CredibilityScore, DomainReputation, ScoreDetails};
use tracing::{debug, info};

/// Scores articles with a fixed, additive rule table
///
/// Every factor is a pure function of one article, the configuration, and
/// the reference date, so scores never depend on other articles in a batch.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storytrace_credibility::{CredibilityScorer, ScoringConfig};
/// use storytrace_domain::{ArticleRecord, ColorBucket};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let scorer = CredibilityScorer::new(ScoringConfig::default())?
///     .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
///
/// let article = ArticleRecord::new("https://www.reuters.com/world/a", "Talks resume")?
///     .with_author("Jane Doe")
///     .with_publish_date(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap());
///
/// let score = scorer.score(&article, &scorer.config().blacklist_domains);
/// assert_eq!(score.score, 10.0);
/// assert_eq!(score.color, ColorBucket::Green);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CredibilityScorer {
    config: ScoringConfig,
    sensational: SensationalMatcher,
    suspicious: Vec<Regex>,
    reference_date: NaiveDate,
}

impl CredibilityScorer {
    /// Create a scorer; recency is measured against today's UTC date
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;

        let sensational = SensationalMatcher::new(&config.sensational_terms)?;
        let suspicious = config
            .suspicious_domain_patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){}", pattern)).map_err(|e| ScoringError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            sensational,
            suspicious,
            reference_date: Utc::now().date_naive(),
        })
    }

    /// Measure recency against `date` instead of today
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Date that article ages are computed against
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Score one article against an explicit blacklist
    pub fn score(&self, article: &ArticleRecord, blacklist: &DomainList) -> CredibilityScore {
        let weights = &self.config.weights;
        let domain = article.domain();
        let mut raw = weights.base;
        let mut flags = Vec::new();
        let mut details = ScoreDetails::default();

        if self.config.trusted_domains.matches(domain) {
            raw += weights.trusted_bonus;
            flags.push("Reputable news source".to_string());
            details.domain_reputation = DomainReputation::Trusted;
        } else if blacklist.matches(domain) {
            raw -= weights.blacklist_penalty;
            flags.push("Domain on blacklist".to_string());
            details.domain_reputation = DomainReputation::Blacklisted;
        }

        if self.suspicious.iter().any(|re| re.is_match(domain)) {
            raw -= self.config.suspicious_domain_penalty;
            flags.push("Suspicious domain pattern detected".to_string());
        }

        match article.author() {
            Some(author) => {
                raw += weights.author_bonus;
                if is_questionable_author(author) {
                    flags.push("Questionable author attribution".to_string());
                } else {
                    details.author_verified = true;
                }
            }
            None => {
                raw -= weights.missing_author_penalty;
                flags.push("No author attributed".to_string());
            }
        }

        match article.publish_date() {
            Some(published) => {
                let age = (self.reference_date - published).num_days();
                details.is_recent = Some((0..=weights.recent_window_days).contains(&age));
                if age < 0 {
                    flags.push("Publication date is in the future".to_string());
                } else if age <= weights.recent_window_days {
                    raw += weights.recent_bonus;
                    flags.push("Recent publication".to_string());
                } else if age > weights.stale_after_days {
                    raw -= weights.stale_penalty;
                    flags.push(age_flag(age));
                }
            }
            None => {
                raw -= weights.stale_penalty;
                flags.push("Publication date unknown".to_string());
            }
        }

        let text = format!("{}\n{}", article.title(), article.content_excerpt());
        let terms = self.sensational.find(&text);
        if !terms.is_empty() {
            let penalty = (weights.sensational_penalty_per_term * terms.len() as f64)
                .min(weights.sensational_penalty_cap);
            raw -= penalty;
            flags.push(format!("Sensational language detected: {}", terms.join(", ")));
        }

        if self.config.penalize_excessive_punctuation && has_excessive_punctuation(article.title()) {
            raw -= self.config.punctuation_penalty;
            flags.push("Excessive punctuation in title".to_string());
        }

        let score = CredibilityScore::new(article.url().to_string(), domain.to_string(), raw, flags)
            .with_details(details);
        debug!(
            "Scored {}: {} ({}) with {} flag(s)",
            score.url,
            score.score,
            score.color.as_str(),
            score.flags.len()
        );
        score
    }

    /// Score every article against the configured blacklist
    ///
    /// Keyed by url; when a url repeats, the first record wins.
    pub fn batch_score(&self, articles: &[ArticleRecord]) -> BTreeMap<String, CredibilityScore> {
        let mut scores = BTreeMap::new();
        for article in articles {
            if !scores.contains_key(article.url()) {
                let score = self.score(article, &self.config.blacklist_domains);
                scores.insert(score.url.clone(), score);
            }
        }
        info!("Scored {} article(s)", scores.len());
        scores
    }

    /// Same result as [`batch_score`](Self::batch_score), computed across threads
    pub fn batch_score_parallel(
        &self,
        articles: &[ArticleRecord],
    ) -> BTreeMap<String, CredibilityScore> {
        let computed: Vec<CredibilityScore> = articles
            .par_iter()
            .map(|article| self.score(article, &self.config.blacklist_domains))
            .collect();

        let mut scores = BTreeMap::new();
        for score in computed {
            scores.entry(score.url.clone()).or_insert(score);
        }
        info!("Scored {} article(s) in parallel", scores.len());
        scores
    }
}

/// A byline that is a single word or contains digits
fn is_questionable_author(author: &str) -> bool {
    author.split_whitespace().count() < 2 || author.chars().any(|c| c.is_ascii_digit())
}

fn has_excessive_punctuation(title: &str) -> bool {
    title.matches('!').count() > 1 || title.matches('?').count() > 1
}

fn age_flag(age_days: i64) -> String {
    let years = age_days / 365;
    match years {
        0 => format!("Article is {} days old", age_days),
        1 => "Article is 1 year old".to_string(),
        n => format!("Article is {} years old", n),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_article() -> impl Strategy<Value = ArticleRecord> {
        (
            prop::sample::select(vec![
                "reuters.com",
                "fake-news.com",
                "local.org",
                "news99.xyz",
                "blog.example.net",
            ]),
            0u32..1000,
            proptest::option::of(prop::sample::select(vec!["Jane Doe", "admin", "J0hn Smith"])),
            proptest::option::of(0i64..1500),
            prop::sample::select(vec![
                "Talks resume",
                "SHOCKING truth EXPOSED!!",
                "You wont believe this",
                "Budget? What budget?",
            ]),
        )
            .prop_map(|(domain, id, author, age, title)| {
                let mut a = ArticleRecord::new(&format!("https://{}/{}", domain, id), title).unwrap();
                if let Some(author) = author {
                    a = a.with_author(author);
                }
                if let Some(age) = age {
                    let reference = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
                    a = a.with_publish_date(reference - chrono::Duration::days(age));
                }
                a
            })
    }

    proptest! {
        /// Property: scores stay in range and the bucket matches the score
        #[test]
        fn test_score_in_range(a in arb_article()) {
            let s = CredibilityScorer::new(ScoringConfig::strict()).unwrap()
                .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
            let result = s.score(&a, &s.config().blacklist_domains);
            prop_assert!((0.0..=10.0).contains(&result.score));
            prop_assert_eq!(result.color, storytrace_domain::ColorBucket::from_score(result.score));
        }

        /// Property: batch scoring does not depend on input order
        #[test]
        fn test_batch_order_independent(
            articles in prop::collection::vec(arb_article(), 0..12),
            seed in any::<u64>(),
        ) {
            let s = CredibilityScorer::new(ScoringConfig::default()).unwrap()
                .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

            let mut seen = std::collections::BTreeSet::new();
            let unique: Vec<ArticleRecord> = articles
                .into_iter()
                .filter(|a| seen.insert(a.url().to_string()))
                .collect();

            let mut shuffled = unique.clone();
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }

            prop_assert_eq!(s.batch_score(&unique), s.batch_score(&shuffled));
            prop_assert_eq!(s.batch_score(&unique), s.batch_score_parallel(&shuffled));
        }
    }
}
