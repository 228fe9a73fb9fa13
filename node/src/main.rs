//! Mirror kit command line.

mod cli;
mod query;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use mk_mirror_client::MirrorNodeClient;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // Logs go to stderr so that stdout only carries the JSON result.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::builder().with_default_directive(Level::INFO.into()).parse_lossy(""));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let config = cli::client_config(&args.provider_params, &args.retry_params)?;
    tracing::debug!(network = %config.network, base_url = config.base_url(), "Using mirror node");

    let client = MirrorNodeClient::new(config).context("Creating the mirror node client")?;
    let output = args.command.run(&client).await?;

    let rendered = serde_json::to_string_pretty(&output).context("Rendering the response")?;
    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}
