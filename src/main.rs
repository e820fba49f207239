use anyhow::Context;
use signalforge::config::Config;
use signalforge::report;
use signalforge::services::{RecommendationStore, ScanOutcome, Scanner};
use signalforge::sources::YahooFinanceClient;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_outcome(outcome: &ScanOutcome) {
    match &outcome.evaluation {
        Ok(eval) => println!("{}", report::render_evaluation(&outcome.symbol, &outcome.bars, eval)),
        Err(e) if e.is_data_unavailable() => {
            error!("{}: no data available, check the symbol", outcome.symbol)
        }
        Err(e) => error!("{}: {}", outcome.symbol, e),
    }
}

fn print_history(store: &RecommendationStore, limit: usize) {
    match report::render_store_summary(store, limit) {
        Ok(text) => print!("{}", text),
        Err(e) => warn!("Failed to read recommendation history: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signalforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Evaluating {} ({} lookback, {} bars)",
        config.symbols.join(", "),
        config.lookback,
        config.interval
    );
    if let Err(e) = config.cfd.validate() {
        anyhow::bail!("invalid CFD parameters: {}", e);
    }

    let store = Arc::new(
        RecommendationStore::new(&config.database_path)
            .with_context(|| format!("opening {}", config.database_path))?,
    );
    let source = Arc::new(YahooFinanceClient::new()?);
    let scanner = Scanner::new(source, &config.lookback, &config.interval, config.cfd)
        .with_store(Arc::clone(&store));

    let Some(period) = config.refresh_interval() else {
        for outcome in scanner.scan(&config.symbols).await {
            print_outcome(&outcome);
        }
        print_history(&store, config.recent_limit);
        return Ok(());
    };

    info!("Refreshing every {}s", period.as_secs());
    let mut interval = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                for outcome in scanner.scan(&config.symbols).await {
                    print_outcome(&outcome);
                }
                print_history(&store, config.recent_limit);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}
