mod sync;

use anyhow::Context as _;
use autosync_core::{load_app_config, load_rules, AppConfig, Classifier};
use autosync_shopify::ShopifyAdminClient;
use autosync_supplier::SupplierClient;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::sync::{RunReport, SyncOptions, SyncRunner};

const FALLBACK_LOG_LEVEL: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "autosync")]
#[command(about = "Mirror supplier products into a Shopify catalog")]
struct Cli {
    /// Make every decision and log it, but create, assign, and delete nothing
    #[arg(long)]
    dry_run: bool,

    /// Run the retirement pass even when AUTOSYNC_RETIRE_ORPHANS is off
    #[arg(long)]
    retire: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config is loaded before the subscriber so its log level can seed the
    // filter; a config error is reported once logging is up.
    let config = load_app_config();
    init_tracing(
        config
            .as_ref()
            .map_or(FALLBACK_LOG_LEVEL, |c| c.log_level.as_str()),
    );

    let result = match config {
        Ok(config) => run(&cli, &config).await.map(|_| ()),
        Err(e) => Err(anyhow::Error::new(e).context("failed to load configuration")),
    };

    // The process exits zero regardless; failures are only logged.
    if let Err(e) = result {
        tracing::error!(error = %format!("{e:#}"), "sync did not run");
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_LEVEL));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<RunReport> {
    tracing::debug!(?config, "configuration loaded");

    let rules = load_rules(&config.rules_path)?;
    let classifier = Classifier::from_rules(&rules)?;
    tracing::info!(
        rules = classifier.rule_count(),
        path = %config.rules_path.display(),
        "classifier rules loaded"
    );

    let shopify = ShopifyAdminClient::new(
        &config.shopify_base_url(),
        &config.shopify_access_token,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Shopify client")?;
    let supplier = SupplierClient::with_base_url(
        config.supplier,
        &config.supplier_token,
        config.request_timeout_secs,
        &config.user_agent,
        &config.supplier_base_url,
    )
    .context("failed to build supplier client")?;

    let options = SyncOptions::from_config(config, cli.dry_run, cli.retire);
    Ok(SyncRunner::new(&supplier, &shopify, &classifier, options)
        .run()
        .await)
}
