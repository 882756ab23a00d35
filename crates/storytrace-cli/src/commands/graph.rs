//! Graph command implementation.

use super::Context;
use crate::cli::GraphArgs;
use crate::error::Result;
use crate::ingest::load_articles;
use crate::output::Formatter;

/// Execute the graph command.
pub fn execute_graph(args: GraphArgs, ctx: &Context<'_>, formatter: &Formatter) -> Result<()> {
    let articles = load_articles(&args.input)?;
    let payload = ctx.pipeline()?.run(&articles, None)?;
    println!("{}", formatter.graph(&payload.graph)?);
    Ok(())
}
