use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sieve_interp::store::tree_io;
use sieve_interp::{MailAdapter, SieveFactory};
use tracing_subscriber::EnvFilter;

/// Evaluate a parsed SIEVE script against a message and print the resulting actions.
#[derive(Parser, Debug)]
#[command(name = "sieve-eval")]
#[command(version)]
struct Cli {
    /// Script tree as JSON
    script: PathBuf,

    /// Message headers and size as JSON
    message: PathBuf,

    /// Interpreter config (defaults to interpreter.json in the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let config = tree_io::load_config(cli.config.as_deref())?;
    let factory = SieveFactory::from_config(&config);
    let script = tree_io::load_script(&cli.script)?;
    let mut mail = tree_io::load_message(&cli.message)?;

    factory.evaluate(&script, &mut mail)?;
    Ok(serde_json::to_string_pretty(mail.actions())?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
