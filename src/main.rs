mod config;
mod indicators;
mod market;
mod model;
mod pipeline;
mod types;
mod web;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::Settings;
use market::PolygonClient;
use model::MlServiceClient;
use pipeline::Predictor;
use web::{start_api_server, AppState};

#[derive(Parser)]
#[command(name = "stock-predictor")]
#[command(version = "0.1.0")]
#[command(about = "Stock price prediction service backed by Polygon.io market data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the prediction HTTP service
    Serve {
        /// Listen port (overrides the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print a one-shot prediction to the console
    Predict {
        /// Ticker symbol
        #[arg(short, long, default_value = "AAPL")]
        ticker: String,

        /// Minutes ahead (clamped to 1-120)
        #[arg(short, long, default_value = "1")]
        ahead: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Stock Predictor v0.1.0");

    let settings = Settings::from_env()?;
    let predictor = Arc::new(build_predictor(&settings));

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(settings.port);
            let state = AppState { predictor };
            start_api_server(state, port).await?;
        }
        Commands::Predict { ticker, ahead } => {
            let result = predictor.predict(&ticker, ahead).await;

            println!("\n=== {} ===", result.ticker);
            println!("Current:    ${:.2}", result.current);
            println!("Prediction: ${:.2} (+{} min)", result.prediction, result.ahead);
            println!(
                "SMA20: {:.2} | EMA20: {:.2} | RSI14: {:.2}",
                result.indicators.sma20, result.indicators.ema20, result.indicators.rsi14
            );
            println!("Bars used:  {}", result.closes.len());
        }
    }

    Ok(())
}

fn build_predictor(settings: &Settings) -> Predictor {
    let market = PolygonClient::new(settings.polygon_api_key.clone());
    let model = MlServiceClient::new(settings.ml_endpoint.clone());
    Predictor::new(Arc::new(market), Arc::new(model))
}
