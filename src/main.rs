use std::process;

use clap::Parser;
use git_ticket::cli::exit_code;
use git_ticket::Cli;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose selects debug, default is warn.
    // Logs go to stderr so they never mix with printed URLs or YAML.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {err}");
            source = err.source();
        }

        process::exit(exit_code(&e));
    }
}
