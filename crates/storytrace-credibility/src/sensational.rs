//! Sensational-language matching

use crate::ScoringError;
use regex::Regex;

/// Case-insensitive, word-bounded matcher over a fixed vocabulary
///
/// Apostrophes inside a term are optional and may be straight or curly, and
/// any run of whitespace in a term matches any run of whitespace in the text.
#[derive(Debug, Clone)]
pub struct SensationalMatcher {
    terms: Vec<(String, Regex)>,
}

impl SensationalMatcher {
    /// Compile a matcher for `terms`; duplicates (ignoring case) are dropped
    pub fn new(terms: &[String]) -> Result<Self, ScoringError> {
        let mut compiled: Vec<(String, Regex)> = Vec::with_capacity(terms.len());
        for term in terms {
            let label = term.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
            if label.is_empty() || compiled.iter().any(|(existing, _)| *existing == label) {
                continue;
            }
            let pattern = term_pattern(&label);
            let regex = Regex::new(&pattern).map_err(|e| ScoringError::InvalidPattern {
                pattern,
                reason: e.to_string(),
            })?;
            compiled.push((label, regex));
        }
        Ok(Self { terms: compiled })
    }

    /// Distinct terms found in `text`, uppercased, in vocabulary order
    ///
    /// # Examples
    ///
    /// ```
    /// use storytrace_credibility::SensationalMatcher;
    ///
    /// let terms = vec!["SHOCKING".to_string(), "YOU WON'T BELIEVE".to_string()];
    /// let matcher = SensationalMatcher::new(&terms).unwrap();
    ///
    /// assert_eq!(
    ///     matcher.find("You wont   believe this shocking twist"),
    ///     vec!["SHOCKING", "YOU WON'T BELIEVE"]
    /// );
    /// assert!(matcher.find("Shockingly mild weather").is_empty());
    /// ```
    pub fn find(&self, text: &str) -> Vec<String> {
        self.terms
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Number of distinct terms in the vocabulary
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn term_pattern(term: &str) -> String {
    let mut body = String::new();
    let mut in_space = false;
    for c in term.chars() {
        if c.is_whitespace() {
            if !in_space {
                body.push_str(r"\s+");
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '\'' | '\u{2019}' => body.push_str("['\u{2019}]?"),
            _ => body.push_str(&regex::escape(&c.to_string())),
        }
    }

    let starts_word = term.chars().next().is_some_and(char::is_alphanumeric);
    let ends_word = term.chars().last().is_some_and(char::is_alphanumeric);
    format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        body,
        if ends_word { r"\b" } else { "" }
    )
}
