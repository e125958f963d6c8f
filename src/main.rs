use anyhow::Result;
use tracing_subscriber::EnvFilter;

use adonorm::cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        cli::print_help();
        return Ok(());
    }

    let parsed = cli::parse_args(&args)?;
    cli::run(parsed)
}
