//! Storytrace CLI - trace news story origins and score source credibility.

use clap::Parser;
use storytrace_cli::commands::{self, Context};
use storytrace_cli::{AppConfig, Cli, Command, Formatter, OutputFormat};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> storytrace_cli::Result<()> {
    let config_path = AppConfig::resolve_path(cli.config.as_deref())?;

    // Config management must work even when the file is broken
    let command = match cli.command {
        Command::Config(args) => {
            let formatter = Formatter::new(OutputFormat::Table, !cli.no_color);
            return commands::execute_config(args, &config_path, &formatter);
        }
        command => command,
    };

    let config = AppConfig::load_from(&config_path)?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    let ctx = Context {
        config: &config,
        as_of: cli.as_of,
    };

    match command {
        Command::Trace(args) => commands::execute_trace(args, &ctx, &formatter),
        Command::Score(args) => commands::execute_score(args, &ctx, &formatter),
        Command::Graph(args) => commands::execute_graph(args, &ctx, &formatter),
        Command::Config(_) => unreachable!(),
    }
}
