//! Trace command implementation.

use super::Context;
use crate::cli::TraceArgs;
use crate::error::Result;
use crate::ingest::load_articles;
use crate::output::Formatter;

/// Execute the trace command.
pub fn execute_trace(args: TraceArgs, ctx: &Context<'_>, formatter: &Formatter) -> Result<()> {
    let articles = load_articles(&args.input)?;
    let payload = ctx.pipeline()?.run(&articles, args.query.as_deref())?;
    println!("{}", formatter.trace_report(&payload, args.pretty)?);
    Ok(())
}
