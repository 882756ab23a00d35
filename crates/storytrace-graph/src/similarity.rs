//! Token-overlap similarity between articles

use std::collections::BTreeSet;

/// Common English words that carry no topical signal
const STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "been", "but", "can", "did", "for",
    "from", "had", "has", "have", "her", "him", "his", "how", "into", "its", "may", "more",
    "not", "now", "one", "our", "out", "over", "said", "says", "she", "than", "that", "the",
    "their", "them", "then", "they", "this", "was", "were", "what", "when", "who", "will",
    "with", "you",
];

/// Normalize text into a set of lowercase word tokens
///
/// Splits on anything that is not alphanumeric, drops tokens shorter than
/// `min_len` characters and stopwords.
///
/// # Examples
///
/// ```
/// use storytrace_graph::tokenize;
///
/// let tokens = tokenize("The Dam BREACH, and the flood!", 3);
/// assert!(tokens.contains("breach"));
/// assert!(!tokens.contains("the"));
/// ```
pub fn tokenize(text: &str, min_len: usize) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= min_len)
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Jaccard index of two token sets; two empty sets score 0
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}
