use anyhow::Context;
use clap::Parser;
use token_info::{cli::Args, Settings};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    token_info::init_logs().context("tracing initialization")?;

    let settings = Settings::build()
        .context("failed to read config")?
        .with_args(Args::parse())
        .context("invalid arguments")?;

    token_info::run(&settings, &mut std::io::stdout())
        .await
        .context("failed to write output")?;

    Ok(())
}
