use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use resource_collections::cli::{Cli, LogLevel};

/// Initialize tracing from --log-level.
///
/// RUST_LOG directives, when set, are added on top. Logs go to stderr so
/// command output on stdout stays machine-readable.
fn initialize_tracing(log_level: LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(extra) = std::env::var("RUST_LOG") {
        for directive in extra.split(',').filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.log_level);

    let name = cli.command.name();
    debug!(command = name, config = %cli.config.display(), "Running command");

    let handler = cli.command.into_handler(cli.config);
    handler
        .execute()
        .with_context(|| format!("{name} command failed"))
}
