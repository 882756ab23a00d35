//! Score command implementation.

use super::Context;
use crate::cli::ScoreArgs;
use crate::error::Result;
use crate::ingest::load_articles;
use crate::output::Formatter;
use storytrace_credibility::{CredibilityReport, ScoringConfig};

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, ctx: &Context<'_>, formatter: &Formatter) -> Result<()> {
    let articles = load_articles(&args.input)?;

    let scoring = if args.strict {
        // Keep the configured reputation tables, add the strict checks
        let strict = ScoringConfig::strict();
        ScoringConfig {
            suspicious_domain_patterns: strict.suspicious_domain_patterns,
            penalize_excessive_punctuation: strict.penalize_excessive_punctuation,
            ..ctx.config.scoring.clone()
        }
    } else {
        ctx.config.scoring.clone()
    };

    let scorer = ctx.scorer(scoring)?;
    let scores = scorer.batch_score_parallel(&articles);
    let report = CredibilityReport::from_scores(&scores);
    println!("{}", formatter.scores(&scores, &report)?);
    Ok(())
}
