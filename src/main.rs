use std::process::ExitCode;

use clap::Parser;
use huaming::cli::{self, Cli};
use huaming_core::config::Config;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/huaming-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("huaming debug log started — tail -f /tmp/huaming-debug.log");
    }

    let config = Config::load(cli.config.as_deref())?;
    let code = cli::run(cli, config, &mut std::io::stdout().lock())?;
    Ok(ExitCode::from(code))
}
