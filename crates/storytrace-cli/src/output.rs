//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use std::collections::BTreeMap;
use storytrace_credibility::CredibilityReport;
use storytrace_domain::{ColorBucket, CredibilityScore};
use storytrace_report::{GraphPayload, ResponsePayload};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a full trace result.
    pub fn trace_report(&self, payload: &ResponsePayload, pretty: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json if pretty => Ok(payload.to_json_pretty()?),
            OutputFormat::Json => Ok(payload.to_json()?),
            OutputFormat::Quiet => Ok(payload.origin_path.path.join("\n")),
            OutputFormat::Table => Ok(self.trace_table(payload)),
        }
    }

    fn trace_table(&self, payload: &ResponsePayload) -> String {
        let origin = &payload.origin_path;
        let mut out = String::new();
        out.push_str(&self.colorize(
            &format!("Origin: {} ({})", origin.origin_domain, origin.origin),
            Color::Cyan,
        ));
        out.push('\n');
        out.push_str(&origin.summary);
        out.push_str("\n\n");

        let mut builder = Builder::default();
        builder.push_record(["Hop", "URL", "Domain", "Credibility"]);
        for (hop, url) in origin.path.iter().enumerate() {
            let node = payload.graph.nodes.iter().find(|n| &n.id == url);
            builder.push_record([
                hop.to_string(),
                url.clone(),
                node.map(|n| n.domain.clone()).unwrap_or_default(),
                node.map(|n| format!("{:.1} ({})", n.credibility, n.color.as_str()))
                    .unwrap_or_default(),
            ]);
        }
        out.push_str(&render(builder));
        out.push_str("\n\n");

        out.push_str(&self.graph_tables(&payload.graph));
        out.push_str("\n\n");

        let summary = &payload.summary;
        out.push_str(&format!(
            "{} article(s), path length {}, average credibility {:.2}, ",
            summary.total_articles, summary.path_length, summary.avg_credibility
        ));
        out.push_str(&self.colorize(
            &format!("{} high risk", summary.high_risk_count),
            if summary.high_risk_count > 0 {
                Color::Red
            } else {
                Color::Green
            },
        ));
        out
    }

    /// Format credibility scores with their batch report.
    pub fn scores(
        &self,
        scores: &BTreeMap<String, CredibilityScore>,
        report: &CredibilityReport,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "scores": scores.values().collect::<Vec<_>>(),
                    "report": report,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(scores
                .values()
                .map(|s| format!("{}\t{:.1}", s.url, s.score))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.scores_table(scores, report)),
        }
    }

    fn scores_table(
        &self,
        scores: &BTreeMap<String, CredibilityScore>,
        report: &CredibilityReport,
    ) -> String {
        if scores.is_empty() {
            return self.warning("No articles scored.");
        }

        let mut builder = Builder::default();
        builder.push_record(["URL", "Score", "Risk", "Flags"]);
        for score in scores.values() {
            builder.push_record([
                score.url.clone(),
                format!("{:.1}", score.score),
                score.risk_level().to_string(),
                score.flags.join("; "),
            ]);
        }

        let mut out = render(builder);
        out.push_str("\n\n");
        out.push_str(&format!(
            "{} article(s), average {:.2}: ",
            report.total, report.avg_score
        ));
        out.push_str(&[
            self.bucket(&format!("{} high risk", report.high_risk), ColorBucket::Red),
            self.bucket(&format!("{} medium risk", report.medium_risk), ColorBucket::Yellow),
            self.bucket(&format!("{} low risk", report.low_risk), ColorBucket::Green),
        ]
        .join(", "));
        if let (Some(most), Some(least)) = (&report.most_credible, &report.least_credible) {
            out.push_str(&format!("\nMost credible: {}\nLeast credible: {}", most, least));
        }
        out
    }

    /// Format the propagation graph.
    pub fn graph(&self, graph: &GraphPayload) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(graph)?),
            OutputFormat::Quiet => Ok(graph
                .links
                .iter()
                .map(|l| format!("{} -> {}", l.source, l.target))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.graph_tables(graph)),
        }
    }

    fn graph_tables(&self, graph: &GraphPayload) -> String {
        let mut nodes = Builder::default();
        nodes.push_record(["ID", "Domain", "Date", "Author", "Credibility"]);
        for node in &graph.nodes {
            nodes.push_record([
                node.id.clone(),
                node.domain.clone(),
                node.date.clone().unwrap_or_else(|| "-".to_string()),
                node.author.clone().unwrap_or_else(|| "-".to_string()),
                format!("{:.1} ({})", node.credibility, node.color.as_str()),
            ]);
        }

        let mut out = render(nodes);
        if graph.links.is_empty() {
            out.push('\n');
            out.push_str(&self.info("No propagation links."));
            return out;
        }

        let mut links = Builder::default();
        links.push_record(["Source", "Target", "Weight", "Kind"]);
        for link in &graph.links {
            links.push_record([
                link.source.clone(),
                link.target.clone(),
                format!("{:.2}", link.weight),
                link.kind.as_str().to_string(),
            ]);
        }
        out.push_str("\n\n");
        out.push_str(&render(links));
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    /// Color text by credibility bucket.
    pub fn bucket(&self, text: &str, bucket: ColorBucket) -> String {
        let color = match bucket {
            ColorBucket::Red => Color::Red,
            ColorBucket::Yellow => Color::Yellow,
            ColorBucket::Green => Color::Green,
        };
        self.colorize(text, color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.color(color).to_string()
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
