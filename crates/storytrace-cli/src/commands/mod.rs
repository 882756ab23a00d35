//! Command implementations.

pub mod config;
pub mod graph;
pub mod score;
pub mod trace;

pub use self::config::execute_config;
pub use self::graph::execute_graph;
pub use self::score::execute_score;
pub use self::trace::execute_trace;

use crate::config::AppConfig;
use crate::error::Result;
use chrono::NaiveDate;
use storytrace_credibility::{CredibilityScorer, ScoringConfig};
use storytrace_report::TracePipeline;

/// Settings shared by every analysis command.
pub struct Context<'a> {
    /// Effective configuration
    pub config: &'a AppConfig,
    /// Reference date for recency, `None` for today
    pub as_of: Option<NaiveDate>,
}

impl Context<'_> {
    /// Build a scorer from `scoring`, honoring `--as-of`.
    pub fn scorer(&self, scoring: ScoringConfig) -> Result<CredibilityScorer> {
        let scorer = CredibilityScorer::new(scoring)?;
        Ok(match self.as_of {
            Some(date) => scorer.with_reference_date(date),
            None => scorer,
        })
    }

    /// Build the full trace pipeline from the configuration.
    pub fn pipeline(&self) -> Result<TracePipeline> {
        let scorer = self.scorer(self.config.scoring.clone())?;
        Ok(TracePipeline::new(
            self.config.graph.clone(),
            self.config.tracer.clone(),
            scorer,
        )?)
    }
}
