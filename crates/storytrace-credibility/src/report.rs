//! Aggregate statistics over a batch of scores

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storytrace_domain::{ColorBucket, CredibilityScore};

/// Summary of a scored batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredibilityReport {
    /// Number of scored articles
    pub total: usize,

    /// Mean score, two decimals
    pub avg_score: f64,

    /// Red bucket count
    pub high_risk: usize,

    /// Yellow bucket count
    pub medium_risk: usize,

    /// Green bucket count
    pub low_risk: usize,

    /// Highest-scoring url (smallest url on ties)
    pub most_credible: Option<String>,

    /// Lowest-scoring url (smallest url on ties)
    pub least_credible: Option<String>,
}

impl CredibilityReport {
    /// Summarize a url-keyed score map
    pub fn from_scores(scores: &BTreeMap<String, CredibilityScore>) -> Self {
        if scores.is_empty() {
            return Self::default();
        }

        let mut report = Self {
            total: scores.len(),
            ..Self::default()
        };
        let mut best: Option<(&str, f64)> = None;
        let mut worst: Option<(&str, f64)> = None;
        let mut sum = 0.0;

        // BTreeMap iterates in url order, so strict comparisons keep the smaller url on ties
        for (url, score) in scores {
            sum += score.score;
            match score.color {
                ColorBucket::Red => report.high_risk += 1,
                ColorBucket::Yellow => report.medium_risk += 1,
                ColorBucket::Green => report.low_risk += 1,
            }
            if best.is_none_or(|(_, s)| score.score > s) {
                best = Some((url, score.score));
            }
            if worst.is_none_or(|(_, s)| score.score < s) {
                worst = Some((url, score.score));
            }
        }

        report.avg_score = (sum / scores.len() as f64 * 100.0).round() / 100.0;
        report.most_credible = best.map(|(url, _)| url.to_string());
        report.least_credible = worst.map(|(url, _)| url.to_string());
        report
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} article(s), average {:.2}: {} high risk, {} medium risk, {} low risk",
            self.total, self.avg_score, self.high_risk, self.medium_risk, self.low_risk
        )
    }
}
