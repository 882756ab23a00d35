//! Graph builder and tracer configuration

use crate::GraphError;
use serde::{Deserialize, Serialize};

/// Default minimum Jaccard similarity for a similarity edge
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.15;

/// Configuration for graph construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// A similarity edge is added only when the score is strictly above this (0.0-1.0)
    pub similarity_threshold: f64,

    /// Tokens shorter than this are ignored
    pub min_token_len: usize,

    /// Include the content excerpt in the token set (title is always included)
    pub include_content: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            min_token_len: 3,
            include_content: true,
        }
    }
}

impl GraphConfig {
    /// Strict preset: only strongly overlapping articles are linked
    pub fn strict() -> Self {
        Self {
            similarity_threshold: 0.3,
            ..Self::default()
        }
    }

    /// Permissive preset: weak overlap is enough for a link
    pub fn permissive() -> Self {
        Self {
            similarity_threshold: 0.08,
            min_token_len: 2,
            include_content: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GraphError> {
        if !(0.0..1.0).contains(&self.similarity_threshold) {
            return Err(GraphError::Config(format!(
                "similarity_threshold must be in [0.0, 1.0), got {}",
                self.similarity_threshold
            )));
        }
        if self.min_token_len == 0 {
            return Err(GraphError::Config(
                "min_token_len must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GraphError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GraphError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, GraphError> {
        toml::to_string_pretty(self)
            .map_err(|e| GraphError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

/// Configuration for origin tracing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Outlets counted separately in the propagation summary
    pub mainstream_domains: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            mainstream_domains: [
                "bbc.com",
                "cnn.com",
                "reuters.com",
                "apnews.com",
                "nytimes.com",
                "washingtonpost.com",
                "theguardian.com",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        }
    }
}

impl TracerConfig {
    /// Whether `domain` is (a subdomain of) a mainstream outlet
    pub fn is_mainstream(&self, domain: &str) -> bool {
        self.mainstream_domains.iter().any(|m| {
            domain == m
                || domain
                    .strip_suffix(m.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}
