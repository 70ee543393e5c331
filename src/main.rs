// questlog - local-first daily goal tracker
// Entry point and application setup

use clap::Parser;
use questlog::{app, cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging. Logs go to stderr so command output stays clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questlog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();

    let mut state = app::setup(args.data_dir.clone()).await?;

    if let Err(e) = cli::run(args.command, &mut state).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
