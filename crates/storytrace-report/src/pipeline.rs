//! End-to-end trace: build, trace, score, assemble

use crate::{ResponsePayload, ResultAssembler, TraceError};
use storytrace_credibility::CredibilityScorer;
use storytrace_domain::{ArticleRecord, ValidationError};
use storytrace_graph::{GraphBuilder, GraphConfig, OriginTracer, TracerConfig};
use tracing::info;

/// Runs every stage of a trace request over one article set
pub struct TracePipeline {
    builder: GraphBuilder,
    tracer: OriginTracer,
    scorer: CredibilityScorer,
    assembler: ResultAssembler,
}

impl TracePipeline {
    /// Create a pipeline
    ///
    /// # Errors
    ///
    /// [`TraceError::Graph`] if `graph_config` is invalid.
    pub fn new(
        graph_config: GraphConfig,
        tracer_config: TracerConfig,
        scorer: CredibilityScorer,
    ) -> Result<Self, TraceError> {
        graph_config.validate()?;
        Ok(Self {
            builder: GraphBuilder::new(graph_config),
            tracer: OriginTracer::new(tracer_config),
            scorer,
            assembler: ResultAssembler::new(),
        })
    }

    /// Scorer used for credibility
    pub fn scorer(&self) -> &CredibilityScorer {
        &self.scorer
    }

    /// Trace `query_url` through `articles`
    ///
    /// Without a query, the first article is traced.
    pub fn run(
        &self,
        articles: &[ArticleRecord],
        query_url: Option<&str>,
    ) -> Result<ResponsePayload, TraceError> {
        let first = articles.first().ok_or(ValidationError::EmptyArticleList)?;
        let query = query_url.unwrap_or_else(|| first.url());
        info!("Tracing {} across {} article(s)", query, articles.len());

        let graph = self.builder.build(articles);
        let origin = self.tracer.trace(&graph, query)?;
        let scores = self.scorer.batch_score_parallel(articles);
        let payload = self.assembler.assemble(&graph, &origin, &scores)?;

        info!(
            "Trace complete: origin {}, {} node(s), average credibility {}",
            payload.origin_path.origin_domain,
            payload.summary.total_articles,
            payload.summary.avg_credibility
        );
        Ok(payload)
    }
}
