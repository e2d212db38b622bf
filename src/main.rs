use anyhow::Result;
use clap::Parser;
use instagrab::cli::Cli;
use instagrab::core::config::ScrapeConfig;
use instagrab::core::proxy::ProxySpec;
use instagrab::infrastructure::logging::init_logging;
use instagrab::sinks::{JsonStdoutSink, ResultSink};
use instagrab::strategies::instagram;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging("instagrab", cli.debug)?;

    let proxy = match cli.proxy_url() {
        Some(raw) => Some(ProxySpec::parse(&raw)?),
        None => None,
    };

    let config = ScrapeConfig::new(!cli.no_headless, cli.timeout, cli.debug, proxy)?;
    info!(
        "scraping {} (headless={}, timeout={}s, proxy={})",
        cli.username,
        config.headless,
        cli.timeout,
        config
            .proxy
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    let result = instagram::scrape_profile(&config, &cli.username).await?;

    JsonStdoutSink::pretty().publish(&result).await?;
    Ok(())
}
