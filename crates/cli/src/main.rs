use clap::Parser;
use dbwire_cli::{Cli, exit_code};
use tracing::debug;

fn main() {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!("Parsed arguments: {:?}", cli);

    let code = match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code::FAILURE
        }
    };
    std::process::exit(code);
}
